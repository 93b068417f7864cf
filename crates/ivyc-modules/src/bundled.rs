//! Bundled stdlib modules: a fixed `name -> { text, required_headers }`
//! mapping built at initialization (§4.3). Each payload is already
//! target-language text -- the registry never parses or translates these,
//! it only hands them to `ivyc-trans` to prepend verbatim.
//!
//! Content and header requirements are carried over from the original
//! implementation's `stdlib/{iostream,string,math,console}` payloads.

/// A single bundled module: its emitted text and the headers it needs.
#[derive(Debug, Clone, Copy)]
pub struct BundledModule {
    pub text: &'static str,
    pub required_headers: &'static [&'static str],
}

const IOSTREAM_TEXT: &str = r#"
namespace iostream {
    template<typename T>
    void print(const T& msg) {
        std::cout << msg;
    }

    template<typename T>
    void println(const T& msg) {
        std::cout << msg << std::endl;
    }
}
"#;

const STRING_TEXT: &str = r#"
namespace string {
    std::string concat(const std::string& s1, const std::string& s2) {
        return s1 + s2;
    }

    int len(const std::string& s) {
        return s.length();
    }

    std::string substr(const std::string& s, int start, int length) {
        return s.substr(start, length);
    }
}
"#;

const MATH_TEXT: &str = r#"
namespace math {
    double sqrt(double n) { return std::sqrt(n); }
    double pow(double base, double exp) { return std::pow(base, exp); }
    double sin(double n) { return std::sin(n); }
    double cos(double n) { return std::cos(n); }
    double tan(double n) { return std::tan(n); }
    double abs(double n) { return std::abs(n); }
    double floor(double n) { return std::floor(n); }
    double ceil(double n) { return std::ceil(n); }
    double round(double n) { return std::round(n); }
    double log(double n) { return std::log(n); }
    double log10(double n) { return std::log10(n); }
    double exp(double n) { return std::exp(n); }
}
"#;

const CONSOLE_TEXT: &str = r#"
enum class ConsoleColor {
    Red,
    Green,
    Blue,
    Yellow,
    White,
    Black
};

void set_color(ConsoleColor color) {
    switch (color) {
        case ConsoleColor::Red:
            std::cout << "\033[31m";
            break;
        case ConsoleColor::Green:
            std::cout << "\033[32m";
            break;
        case ConsoleColor::Blue:
            std::cout << "\033[34m";
            break;
        case ConsoleColor::Yellow:
            std::cout << "\033[33m";
            break;
        case ConsoleColor::White:
            std::cout << "\033[37m";
            break;
        case ConsoleColor::Black:
            std::cout << "\033[30m";
            break;
    }
}

void reset_color() {
    std::cout << "\033[0m";
}

void clear() {
    std::cout << "\033[2J\033[H";
}
"#;

/// Looks up a bundled module by its bare `import NAME;` name. `None` means
/// the caller should raise `UnknownStdlibModule`.
pub fn lookup(name: &str) -> Option<BundledModule> {
    Some(match name {
        "iostream" => BundledModule {
            text: IOSTREAM_TEXT,
            required_headers: &["iostream"],
        },
        "string" => BundledModule {
            text: STRING_TEXT,
            required_headers: &["string"],
        },
        "math" => BundledModule {
            text: MATH_TEXT,
            required_headers: &["cmath"],
        },
        "console" => BundledModule {
            text: CONSOLE_TEXT,
            required_headers: &["iostream"],
        },
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_names_resolve() {
        for name in ["iostream", "string", "math", "console"] {
            assert!(lookup(name).is_some(), "{name} should resolve");
        }
    }

    #[test]
    fn unrecognized_name_is_none() {
        assert!(lookup("not_a_module").is_none());
    }

    #[test]
    fn math_requires_cmath() {
        assert_eq!(lookup("math").unwrap().required_headers, &["cmath"]);
    }

    #[test]
    fn console_requires_iostream() {
        assert_eq!(lookup("console").unwrap().required_headers, &["iostream"]);
    }
}
