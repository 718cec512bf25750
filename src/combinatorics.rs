use std::collections::{BTreeMap, BTreeSet};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A field value inside a generalized tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot<T> {
    One(T),
    /// Matches every value of the field.
    Any,
}

impl<T: PartialEq> Slot<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Slot::One(v) => v == value,
            Slot::Any => true,
        }
    }
}

impl<T> Slot<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Slot<U> {
        match self {
            Slot::One(v) => Slot::One(f(v)),
            Slot::Any => Slot::Any,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Slot::Any)
    }
}

impl<T> From<T> for Slot<T> {
    fn from(value: T) -> Self {
        Slot::One(value)
    }
}

const WILDCARD: &str = "*";

impl<T: Serialize> Serialize for Slot<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Slot::One(v) => v.serialize(serializer),
            Slot::Any => serializer.serialize_str(WILDCARD),
        }
    }
}

/// Only deserializes from the literal `"*"`.
struct Wildcard;

impl<'de> Deserialize<'de> for Wildcard {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == WILDCARD {
            Ok(Wildcard)
        } else {
            Err(de::Error::invalid_value(de::Unexpected::Str(&s), &"\"*\""))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SlotRepr<T> {
    Any(Wildcard),
    One(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Slot<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match SlotRepr::deserialize(deserializer)? {
            SlotRepr::Any(Wildcard) => Slot::Any,
            SlotRepr::One(v) => Slot::One(v),
        })
    }
}

/// Mixed radix odometer.
///
/// Advances `selected` to the next tuple choosing one option per field, where
/// field `i` has `num_options[i]` options. The first field turns fastest.
/// Pass an empty `selected` to start; returns `false` once every tuple has
/// been visited. Any zero count means there are no tuples at all.
pub fn next_choose_one_from_each(num_options: &[u8], selected: &mut Vec<u8>) -> bool {
    if num_options.iter().any(|&n| n == 0) {
        return false;
    }

    if selected.len() != num_options.len() {
        selected.clear();
        selected.resize(num_options.len(), 0);
        return true;
    }

    for (value, &count) in selected.iter_mut().zip(num_options) {
        *value += 1;
        if *value < count {
            return true;
        }
        *value = 0;
    }

    // wrapped around
    false
}

/// Every tuple of [`next_choose_one_from_each`], collected.
pub fn choose_one_from_each(num_options: &[u8]) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut selected = Vec::new();
    while next_choose_one_from_each(num_options, &mut selected) {
        out.push(selected.clone());
    }
    out
}

/// Collapses a single field: tuples agreeing on every other field and together
/// covering all of the field's options become one tuple with [`Slot::Any`].
fn collapse_field(field: usize, num_options: usize, tuples: &[Vec<Slot<u8>>]) -> Vec<Vec<Slot<u8>>> {
    let mut context2values: BTreeMap<Vec<Slot<u8>>, BTreeSet<Slot<u8>>> = BTreeMap::new();
    for tuple in tuples {
        let mut context = tuple.clone();
        context[field] = Slot::Any;
        context2values.entry(context).or_default().insert(tuple[field]);
    }

    let mut out = Vec::with_capacity(tuples.len());
    for (context, values) in context2values {
        if values.contains(&Slot::Any) || values.len() >= num_options {
            out.push(context);
            continue;
        }
        for value in values {
            let mut tuple = context.clone();
            tuple[field] = value;
            out.push(tuple);
        }
    }
    out
}

/// Greedily generalizes `tuples` by wildcarding fields.
///
/// Each step applies the one field collapse that leaves the fewest tuples
/// (lowest field on ties) and stops once no field shrinks the set. Field 0 is
/// never wildcarded. Running it again on its own output changes nothing.
pub fn collapse_to_wildcards(num_options: &[u8], mut tuples: Vec<Vec<Slot<u8>>>) -> Vec<Vec<Slot<u8>>> {
    loop {
        let mut best: Option<Vec<Vec<Slot<u8>>>> = None;
        for (field, &count) in num_options.iter().enumerate().skip(1) {
            let candidate = collapse_field(field, count as usize, &tuples);
            let shrinks = candidate.len() < tuples.len();
            let beats_best = best.as_ref().map_or(true, |b| candidate.len() < b.len());
            if shrinks && beats_best {
                best = Some(candidate);
            }
        }
        match best {
            Some(collapsed) => tuples = collapsed,
            None => return tuples,
        }
    }
}
