/// Rank `candidates` by edit distance to `target` and return at most
/// `limit` of them whose distance is within `max_distance`.
///
/// Ties keep candidate order. Candidates whose length alone puts them out
/// of range are skipped without computing the distance.
#[must_use]
pub fn suggest<'c, I>(target: &str, candidates: I, limit: usize, max_distance: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'c str>,
{
    if limit == 0 {
        return Vec::new();
    }
    let target_len = target.chars().count();
    let mut ranked: Vec<(usize, usize, &str)> = candidates
        .into_iter()
        .enumerate()
        .filter(|(_, c)| target_len.abs_diff(c.chars().count()) <= max_distance)
        .map(|(i, c)| (levenshtein(target, c), i, c))
        .filter(|(d, _, _)| *d <= max_distance)
        .collect();
    ranked.sort_unstable_by_key(|(d, i, _)| (*d, *i));
    ranked
        .into_iter()
        .take(limit)
        .map(|(_, _, c)| c.to_owned())
        .collect()
}

/// Levenshtein distance over chars, single-row dynamic programming.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ca != *cb);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }
    row[b.len()]
}
