use std::collections::BTreeMap;

use crate::tree::{Node, Tree};

pub fn generate_codes(tree: &Tree) -> CodeTable {
    CodeTable::from_root(tree.root())
}

/// `'0'` for a left descent, `'1'` for a right one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable(BTreeMap<u8, String>);

impl CodeTable {
    fn from_root(root: &Node) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(root, String::new())];

        while let Some((node, code)) = stack.pop() {
            match node.children() {
                Some((left, right)) => {
                    let mut right_code = code.clone();
                    right_code.push('1');
                    stack.push((right, right_code));

                    let mut left_code = code;
                    left_code.push('0');
                    stack.push((left, left_code));
                }
                None => {
                    codes.insert(node.symbol(), code);
                }
            }
        }

        Self(codes)
    }

    pub fn get(&self, symbol: u8) -> Option<&str> {
        self.0.get(&symbol).map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.0.iter().map(|(&symbol, code)| (symbol, code.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rstest::rstest;

    use crate::{frequency::FrequencyTable, tree::build_tree};

    use super::generate_codes;

    #[test]
    fn test_code_generation() {
        // weights come from
        // https://opendsa-server.cs.vt.edu/ODSA/Books/CS3/html/Huffman.html
        let mut frequencies = FrequencyTable::default();
        for (symbol, frequency) in [
            (b'C', 32),
            (b'D', 42),
            (b'E', 120),
            (b'K', 7),
            (b'L', 42),
            (b'M', 24),
            (b'U', 37),
            (b'Z', 2),
        ] {
            frequencies.set(symbol, frequency);
        }

        let tree = build_tree(&frequencies).unwrap();
        let codes = generate_codes(&tree);
        let expected_codes = [
            (b'C', "1110"),
            (b'D', "101"),
            (b'E', "0"),
            (b'K', "111101"),
            (b'L', "110"),
            (b'M', "11111"),
            (b'U', "100"),
            (b'Z', "111100"),
        ];

        assert_eq!(codes.len(), expected_codes.len());
        for (symbol, expected_code) in expected_codes {
            assert_eq!(codes.get(symbol), Some(expected_code));
        }
    }

    #[rstest]
    #[case(b"aaabbbbcc", &[(b'a', "11"), (b'b', "0"), (b'c', "10")])]
    #[case(b"abcd", &[(b'a', "00"), (b'b', "01"), (b'c', "10"), (b'd', "11")])]
    #[case(b"abcc", &[(b'a', "00"), (b'b', "01"), (b'c', "1")])]
    #[case(b"bcaa", &[(b'a', "0"), (b'b', "10"), (b'c', "11")])]
    fn test_small_alphabets(#[case] input: &[u8], #[case] expected: &[(u8, &str)]) {
        let tree = build_tree(&FrequencyTable::count(input)).unwrap();
        let codes = generate_codes(&tree);
        assert_eq!(codes.iter().collect_vec(), expected.to_vec());
    }

    #[test]
    fn test_absent_symbols_have_no_code() {
        let tree = build_tree(&FrequencyTable::count(b"ab")).unwrap();
        let codes = generate_codes(&tree);
        assert_eq!(codes.get(b'z'), None);
    }

    #[test]
    fn test_lone_leaf_gets_an_empty_code() {
        let tree = build_tree(&FrequencyTable::count(b"zzz")).unwrap();
        let codes = generate_codes(&tree);
        assert_eq!(codes.iter().collect_vec(), vec![(b'z', "")]);
    }

    #[test]
    fn test_codes_are_prefix_free() {
        let input = (0..=u8::MAX)
            .flat_map(|symbol| std::iter::repeat(symbol).take(symbol as usize % 17 + 1))
            .collect_vec();
        let tree = build_tree(&FrequencyTable::count(&input)).unwrap();
        let codes = generate_codes(&tree);
        assert_eq!(codes.len(), 256);

        let codes = codes.iter().collect_vec();
        for ((a, code_a), (b, code_b)) in codes.into_iter().tuple_combinations() {
            assert!(
                !code_a.starts_with(code_b) && !code_b.starts_with(code_a),
                "code for {a} ({code_a}) and code for {b} ({code_b}) share a prefix"
            );
        }
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        // fibonacci weights produce a maximally skewed tree
        let mut frequencies = FrequencyTable::default();
        let (mut a, mut b) = (1_u64, 1_u64);
        for symbol in 0..64_u8 {
            frequencies.set(symbol, a);
            (a, b) = (b, a + b);
        }

        let tree = build_tree(&frequencies).unwrap();
        let codes = generate_codes(&tree);
        let longest = codes.iter().map(|(_, code)| code.len()).max().unwrap();
        assert_eq!(longest, 63);
    }
}
