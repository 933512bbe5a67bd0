/// Print a success message with checkmark
pub fn success(msg: &str) {
    println!("  ✓ {}", msg);
}

/// Print an error message with X
pub fn error(msg: &str) {
    eprintln!("  ✗ {}", msg);
}

/// Print a dimmed/secondary message
pub fn dim(msg: &str) {
    println!("    {}", msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg);
}

/// Print a multi-line block indented under the previous line
pub fn block(text: &str) {
    for line in text.lines() {
        println!("    │ {}", line);
    }
}
