fn normalize_token(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let above = row[j + 1];
            let substitution = diagonal + usize::from(ca != *cb);
            row[j + 1] = substitution.min(above + 1).min(row[j] + 1);
            diagonal = above;
        }
    }
    row[b_chars.len()]
}

fn distance(input: &str, candidate: &str) -> Option<usize> {
    if input.is_empty() || candidate.is_empty() {
        return None;
    }
    if input == candidate {
        return Some(0);
    }
    if input.contains(candidate) || candidate.contains(input) {
        return Some(1);
    }
    Some(edit_distance(input, candidate))
}

fn tolerance(normalized_len: usize) -> usize {
    match normalized_len {
        0 => 0,
        1..=4 => 1,
        5..=8 => 2,
        n => ((n as f32) * 0.35).floor().max(3.0) as usize,
    }
}

/// Ranks `candidates` by closeness to `input`, case- and punctuation-blind.
pub fn suggest(input: &str, candidates: &[&str], limit: usize) -> Vec<String> {
    let needle = normalize_token(input);
    let allowed = tolerance(needle.len());
    let mut scored: Vec<(usize, &str)> = candidates
        .iter()
        .filter_map(|candidate| {
            distance(&needle, &normalize_token(candidate))
                .filter(|score| *score <= allowed)
                .map(|score| (score, *candidate))
        })
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.len().cmp(&b.1.len())));
    scored.dedup_by(|a, b| a.1 == b.1);
    scored
        .into_iter()
        .take(limit.max(1))
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::suggest;

    const OPERATIONS: &[&str] = &[
        "sendTextMessage",
        "sendMediaMessage",
        "checkConnection",
        "getProfile",
    ];

    #[test]
    fn suggests_closest_operation_for_typo() {
        assert_eq!(suggest("sendTextMesage", OPERATIONS, 3), vec!["sendTextMessage"]);
    }

    #[test]
    fn substring_match_counts_as_close() {
        assert_eq!(suggest("profile", OPERATIONS, 3), vec!["getProfile"]);
    }

    #[test]
    fn unrelated_input_yields_nothing() {
        assert!(suggest("deleteInstance", OPERATIONS, 3).is_empty());
        assert!(suggest("", OPERATIONS, 3).is_empty());
    }
}
