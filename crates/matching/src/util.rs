/// Levenshtein edit distance using the two-row O(min(m,n)) space algorithm.
/// Distances are counted in `char`s so accented and non-Latin names are not
/// penalised per UTF-8 byte.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let (m, n) = (a.len(), b.len());

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let (a, b, m, n) = if m <= n { (a, b, m, n) } else { (b, a, n, m) };

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_are_zero() {
        assert_eq!(levenshtein_distance("liam", "liam"), 0);
        assert_eq!(levenshtein_distance("", ""), 0);
    }

    #[test]
    fn empty_string_is_length_of_other() {
        assert_eq!(levenshtein_distance("", "cox"), 3);
        assert_eq!(levenshtein_distance("cox", ""), 3);
    }

    #[test]
    fn single_insertion() {
        assert_eq!(levenshtein_distance("johnson", "johnston"), 1);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(levenshtein_distance("rodriguez", "rodríguez"), 1);
        assert_eq!(levenshtein_distance("μαρια", "maria"), 5);
    }

    #[test]
    fn commutative() {
        assert_eq!(
            levenshtein_distance("hillips", "phillips"),
            levenshtein_distance("phillips", "hillips")
        );
    }
}
