use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;

/// Marks the start of a word once reversed, so a whole word is never mistaken
/// for the suffix of a longer one.
const TERMINATOR: &str = "^";

#[derive(Clone, Debug)]
enum Node<T> {
    /// Every member shares `value`.
    Leaf { value: T, members: Vec<usize> },
    /// Members disagreed here and were pushed further down.
    Internal { value: T },
}

impl<T> Node<T> {
    fn value(&self) -> &T {
        match self {
            Node::Leaf { value, .. } | Node::Internal { value } => value,
        }
    }
}

/// Predicts a value for any word from a dictionary of words to values,
/// by the shortest word ending that tells the dictionary entries apart.
///
/// Every trained word gets back its own value. Any other word gets the value
/// of the longest trained ending it shares, preferring the smallest value
/// where the trained words sharing that ending disagree.
#[derive(Clone, Debug)]
pub struct GeneralizingSuffixTree<T> {
    /// Reversed word prefix (a word ending) to node.
    nodes: HashMap<String, Node<T>>,
}

fn reversed_key(word: &str) -> Vec<&str> {
    let mut key: Vec<&str> = word.graphemes(true).rev().collect();
    key.push(TERMINATOR);
    key
}

impl<T: Clone + Ord> GeneralizingSuffixTree<T> {
    pub fn new<'a>(dict: impl IntoIterator<Item = (&'a str, T)>) -> Self {
        let entries: Vec<(Vec<&str>, T)> = dict
            .into_iter()
            .map(|(word, value)| (reversed_key(word), value))
            .collect();
        let mut nodes: HashMap<String, Node<T>> = HashMap::new();

        let mut todo: Vec<usize> = (0..entries.len()).collect();
        let mut len = 0;
        while !todo.is_empty() {
            let mut next = Vec::new();
            for x in todo {
                let (key, value) = &entries[x];
                if key.len() < len {
                    // duplicate word, already placed
                    continue;
                }
                let prefix = key[..len].concat();
                let Some(node) = nodes.get_mut(&prefix) else {
                    nodes.insert(
                        prefix,
                        Node::Leaf {
                            value: value.clone(),
                            members: vec![x],
                        },
                    );
                    continue;
                };
                match node {
                    Node::Leaf { value: v, members } if *v == *value => members.push(x),
                    Node::Leaf { value: v, members } => {
                        // conflict, everyone here needs a longer ending
                        let members = std::mem::take(members);
                        let min = std::cmp::min(v.clone(), value.clone());
                        *node = Node::Internal { value: min };
                        next.extend(members);
                        next.push(x);
                    }
                    Node::Internal { value: v } => {
                        if *value < *v {
                            *v = value.clone();
                        }
                        next.push(x);
                    }
                }
            }
            todo = next;
            len += 1;
        }

        Self { nodes }
    }

    /// `None` only when trained on nothing.
    pub fn get(&self, word: &str) -> Option<&T> {
        let key = reversed_key(word);
        (0..=key.len())
            .rev()
            .find_map(|len| self.nodes.get(&key[..len].concat()))
            .map(Node::value)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}
