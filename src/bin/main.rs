use crossterm::queue;
use crossterm::style::{style, Color, PrintStyledContent, Stylize};
use std::fs::File;
use std::io::{stdin, stdout, Write};
use std::path::Path;
use std::sync::Mutex;
use tajweed_core::core::renderer::segments;
use tajweed_core::core::rules::hex_to_rgb;
use tajweed_core::{EngineConfig, TajweedEngine, VerseKey};

/// Appends log records to a file so they never interleave with the verse output.
struct FileLogger {
    file: Mutex<File>,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

fn init_logging(config: &EngineConfig) -> tajweed_core::Result<()> {
    if let Some(parent) = config.log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::options().create(true).append(true).open(&config.log_path)?;
    let logger = Box::leak(Box::new(FileLogger { file: Mutex::new(file) }));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(config.level_filter()?);
    }
    Ok(())
}

fn load_config() -> tajweed_core::Result<EngineConfig> {
    match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(Path::new(&path)),
        None => Ok(EngineConfig::default()),
    }
}

fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[ERROR] Could not load config: {}", e);
            std::process::exit(2);
        }
    };
    if let Err(e) = init_logging(&config) {
        eprintln!("[WARN] Logging disabled: {}", e);
    }

    let engine = match TajweedEngine::from_config(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("[ERROR] Could not load tajweed data: {}", e);
            std::process::exit(1);
        }
    };

    println!("Tajweed engine ({} verses). Enter 'surah:ayah', 'json surah:ayah', 'legend' or 'exit'.", engine.index().len());
    println!("---------------------------------------------------------------");

    loop {
        print!("\n> ");
        let _ = stdout().flush();

        let mut input = String::new();
        match stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let result = match input.trim() {
            "exit" => break,
            "" => Ok(()),
            "legend" => print_legend(&engine),
            cmd => match cmd.strip_prefix("json ") {
                Some(key) => print_json(&engine, key),
                None => print_verse(&engine, cmd),
            },
        };
        if let Err(e) = result {
            eprintln!("[ERROR] {}", e);
        }
    }
    log::Log::flush(log::logger());
}

fn rule_color(color: &str) -> Color {
    match hex_to_rgb(color) {
        Some((r, g, b)) => Color::Rgb { r, g, b },
        None => Color::Reset,
    }
}

fn print_verse(engine: &TajweedEngine, key: &str) -> Result<(), Box<dyn std::error::Error>> {
    let key: VerseKey = key.parse()?;
    let index = engine.index();
    let Some(text) = index.lookup_text(key) else {
        println!("No text for {}", key);
        return Ok(());
    };

    let mut out = stdout();
    for segment in segments(text, index.lookup_annotations(key)) {
        let content = style(segment.text.as_str());
        let content = match segment.style {
            Some(rule) => content.with(rule_color(rule.color)),
            None => content,
        };
        queue!(out, PrintStyledContent(content))?;
    }
    writeln!(out)?;

    if let Some(words) = engine.verse_words(key) {
        for (i, word) in words.iter().enumerate() {
            writeln!(out, "  {:>2}: {}", i + 1, word.markup)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn print_json(engine: &TajweedEngine, key: &str) -> Result<(), Box<dyn std::error::Error>> {
    let key: VerseKey = key.trim().parse()?;
    match engine.verse_words(key) {
        Some(words) => println!("{}", serde_json::to_string_pretty(words.as_ref())?),
        None => println!("null"),
    }
    Ok(())
}

fn print_legend(engine: &TajweedEngine) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = stdout();
    for entry in engine.legend() {
        queue!(out, PrintStyledContent(style("■ ").with(rule_color(entry.color))))?;
        writeln!(out, "{:<22} {} {}", entry.id, entry.color, entry.display_name)?;
    }
    out.flush()?;
    Ok(())
}
