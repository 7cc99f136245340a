use tmxliff::TranslationUnit;

/// Print a text view of extracted units.
pub fn print_view(units: &[TranslationUnit], full: bool) {
    if units.is_empty() {
        println!("No translation units found");
        return;
    }

    println!("Units: {}", units.len());
    for unit in units {
        println!("\n  Unit {}: {}", unit.seg_number, unit.unit_id);
        println!("    Languages: {} -> {}", display_lang(&unit.source_lang), display_lang(&unit.target_lang));
        if unit.has_match_percent() {
            println!("    Match: {}%", unit.match_percent);
        }
        if let Some(context) = &unit.context_id {
            println!("    Context: {}", context);
        }
        println!("    Source: {}", shorten(&unit.source, full));
        println!("    Target: {}", shorten(&unit.target, full));
    }
}

fn display_lang(lang: &str) -> &str {
    if lang.is_empty() { "?" } else { lang }
}

/// Truncates to 50 characters unless `full` is set.
fn shorten(value: &str, full: bool) -> String {
    if full || value.chars().count() <= 50 {
        value.to_string()
    } else {
        let head: String = value.chars().take(50).collect();
        format!("{}...", head)
    }
}
