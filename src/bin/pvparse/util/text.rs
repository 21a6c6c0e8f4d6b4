/// Greedy word wrap; always yields at least one (possibly empty) line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for word in text.split_whitespace() {
        match lines.last_mut() {
            Some(line) if line.chars().count() + 1 + word.chars().count() <= width => {
                line.push(' ');
                line.push_str(word);
            }
            _ => lines.push(word.to_string()),
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Shortens `s` to at most `max_chars` characters, marking the cut with `…`.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let mut out: String = s.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_width() {
        assert_eq!(wrap("Integrator not found.", 40), vec!["Integrator not found."]);
        assert_eq!(
            wrap("thermodynamic log has no column", 17),
            vec!["thermodynamic log", "has no column"]
        );
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("kinetic_energy", 20), "kinetic_energy");
        assert_eq!(truncate("potential_energy", 8), "potenti…");
        assert_eq!(truncate("kJ/mol/nm³", 4), "kJ/…");
        assert_eq!(truncate("abc", 0), "");
    }
}
