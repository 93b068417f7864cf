use ivyc_drv::run;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    match run(&args) {
        Ok(text) => {
            print!("{text}");
        }
        Err(e) => {
            eprintln!("{}", e.message());
            std::process::exit(e.exit_code());
        }
    }
}
