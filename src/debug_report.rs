use passgrab::{CandidateToken, ParseReport, TokenClass};

mod ansi {
    const RESET: &str = "\x1b[0m";
    const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";

    /// Wraps text in an SGR code, or passes it through when color is off.
    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, code: &str) -> String {
            if self.enabled { format!("{code}{}{RESET}", s.as_ref()) } else { s.as_ref().to_owned() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            self.paint(s, DIM)
        }
    }
}

pub fn print_report(source: &str, report: &ParseReport, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.paint(format!("⚙  Parsing: {source}"), ansi::BOLD));

    println!("\n{}", palette.dim("━━━ Candidates ━━━"));
    match report.normalized_len {
        None => println!("{}", palette.dim("  Page could not be decoded; nothing was scanned")),
        Some(len) => {
            println!("  {} {}", palette.dim("normalized text:"), palette.paint(format!("{len} bytes"), ansi::BLUE));
            for class in TokenClass::ALL {
                print_class(report, class, &palette);
            }
        }
    }

    println!("\n{}", palette.dim("━━━ Outcome ━━━"));
    match &report.outcome {
        Ok(_) => println!("  {}", palette.paint("✓ all three passwords recovered", ansi::GREEN)),
        Err(err) => {
            println!("  {} {}", palette.paint("✗", ansi::RED), palette.paint(err.to_string(), ansi::BOLD));
            println!("  {} {}", palette.dim("kind:"), palette.paint(format!("{:?}", err.kind()), ansi::YELLOW));
        }
    }

    let t = &report.timings;
    println!("\n{}", palette.dim("━━━ Timing ━━━"));
    println!(
        "  Total: {}  │  Decode: {}  │  Sanitize: {}  │  Entities: {}  │  Extract: {}  │  Disambiguate: {}",
        palette.paint(format!("{:?}", t.total), ansi::GREEN),
        palette.dim(format!("{:?}", t.decode)),
        palette.dim(format!("{:?}", t.sanitize)),
        palette.dim(format!("{:?}", t.entities)),
        palette.paint(format!("{:?}", t.extract), ansi::BLUE),
        palette.dim(format!("{:?}", t.disambiguate)),
    );
    println!();
}

fn print_class(report: &ParseReport, class: TokenClass, palette: &ansi::Palette) {
    let found: Vec<&CandidateToken> = report.candidates.iter().filter(|c| c.class == class).collect();
    let label = format!("{} ({} chars):", class.name(), class.width());

    if found.is_empty() {
        println!("  {} {}", palette.paint(label, ansi::BLUE), palette.dim("✗ none"));
        return;
    }
    println!("  {} {}", palette.paint(label, ansi::BLUE), palette.paint(format!("✓ {}", found.len()), ansi::GREEN));

    let selected = report.outcome.as_ref().ok().and_then(|set| {
        set.entries().into_iter().find(|(c, _)| *c == class).map(|(_, text)| text.to_owned())
    });
    for candidate in found.iter().take(5) {
        let marker = if selected.as_deref() == Some(candidate.text.as_str()) { "▶" } else { " " };
        println!(
            "   {} {} {} {}",
            palette.paint(marker, ansi::GREEN),
            palette.paint(format!("{}..{}", candidate.range.start, candidate.range.end), ansi::YELLOW),
            palette.dim(if candidate.has_special() { "special" } else { "plain  " }),
            palette.dim(&candidate.text)
        );
    }
    if found.len() > 5 {
        println!("     {}", palette.dim(format!("... +{} more", found.len() - 5)));
    }
}
