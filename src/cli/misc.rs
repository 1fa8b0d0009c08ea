use colored::Colorize;
use std::fmt::Display;
use std::path::Path;

pub fn print_init(command: &str, args: &impl Display) {
    println!(
        "{} {}\n{}",
        "GUIDECOUNT".green().bold(),
        command.green(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
    print!("{args}");
}

pub fn print_written(label: &str, path: &Path) {
    println!("{}: {}", label.green(), path.display());
}
