use std::cell::RefCell;

use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::{SplitMix64, Xoshiro256StarStar};
use structural_value::{
    ArrayRef, Class, FunctionRef, MapRef, ObjectRef, PropertyDescriptor, RegExpRef, SetRef, Value,
};

const KEY_CHARS: &str = "abcdefghijkxyz";

const PATTERNS: &[(&str, &str)] = &[
    ("a+b", "g"),
    ("^\\d{3}$", ""),
    ("[a-z]+", "gi"),
    ("", ""),
    ("x.y", "ms"),
];

/// Options for [`Fuzzer::graph`].
#[derive(Debug, Clone)]
pub struct GraphOptions {
    /// Below this depth composites may be generated. Default is 4.
    pub max_depth: usize,
    /// Maximum number of children of a composite. Default is 4.
    pub max_width: i64,
    /// Probability that a child reuses a composite generated earlier. Default is 0.1.
    pub share_odds: f64,
    /// Probability that a child points back at one of its ancestors. Default is 0.05.
    pub cycle_odds: f64,
    /// Probability that an object property is an accessor whose getter builds
    /// a fresh composite on every read. Default is 0.15.
    pub accessor_odds: f64,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            max_depth: 4,
            max_width: 4,
            share_odds: 0.1,
            cycle_odds: 0.05,
            accessor_odds: 0.15,
        }
    }
}

/// A fuzzer for generating random test data.
///
/// Uses the xoshiro256** PRNG for reproducible random sequences when seeded.
///
/// # Examples
///
/// ```
/// use structural_util::fuzzer::{Fuzzer, GraphOptions};
///
/// let fuzzer = Fuzzer::from_u64(7);
/// let n = fuzzer.random_int(1, 10);
/// assert!(n >= 1 && n <= 10);
///
/// let graph = fuzzer.graph(&GraphOptions::default());
/// assert!(graph.is_object() || graph.is_primitive());
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: RefCell<Xoshiro256StarStar>,
}

impl Fuzzer {
    /// Create a new fuzzer with an optional seed.
    ///
    /// If no seed is provided, a random seed will be generated using `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });

        Self {
            seed,
            rng: RefCell::new(Xoshiro256StarStar::from_seed(seed)),
        }
    }

    /// Create a fuzzer whose 32-byte seed is expanded from `seed`.
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        SplitMix64::seed_from_u64(seed).fill_bytes(&mut bytes);
        Self::new(Some(bytes))
    }

    /// Generate a random integer in the range [min, max] (inclusive).
    pub fn random_int(&self, min: i64, max: i64) -> i64 {
        self.rng.borrow_mut().gen_range(min..=max)
    }

    /// Generate a random f64 in the range [0, 1).
    pub fn random(&self) -> f64 {
        self.rng.borrow_mut().gen::<f64>()
    }

    /// Generate a random boolean with the given probability of being true.
    pub fn random_bool(&self, probability: f64) -> bool {
        self.rng.borrow_mut().gen_bool(probability)
    }

    /// Pick a random element from a non-empty slice.
    pub fn pick<'a, T>(&self, elements: &'a [T]) -> &'a T {
        let idx = self.rng.borrow_mut().gen_range(0..elements.len());
        &elements[idx]
    }

    /// Generate a random string of the specified length from the given characters.
    pub fn random_string(&self, len: usize, chars: &str) -> String {
        let chars: Vec<char> = chars.chars().collect();
        let mut rng = self.rng.borrow_mut();
        (0..len)
            .map(|_| chars[rng.gen_range(0..chars.len())])
            .collect()
    }

    /// Generate a random value graph.
    ///
    /// Besides primitives the graph contains every composite kind, composites
    /// reachable along more than one path, and cycles. Dates are always valid
    /// and numbers never `NaN`, so a graph is deeply equal to a faithful copy
    /// of itself.
    pub fn graph(&self, options: &GraphOptions) -> Value {
        let mut state = GraphState {
            pool: Vec::new(),
            ancestors: Vec::new(),
            classes: vec![Class::new("Point"), Class::new("Node")],
            functions: vec![
                FunctionRef::new("noop", |_, _| Value::Undefined),
                FunctionRef::new("identity", |this, _| this.clone()),
            ],
            regexps: PATTERNS
                .iter()
                .filter_map(|(pattern, flags)| RegExpRef::new(pattern, flags).ok())
                .collect(),
        };
        self.node(0, options, &mut state)
    }

    fn node(&self, depth: usize, options: &GraphOptions, state: &mut GraphState) -> Value {
        if depth > 0 {
            if !state.ancestors.is_empty() && self.random_bool(options.cycle_odds) {
                return self.pick(&state.ancestors).clone();
            }
            if !state.pool.is_empty() && self.random_bool(options.share_odds) {
                return self.pick(&state.pool).clone();
            }
        }

        let kind = if depth >= options.max_depth {
            self.random_int(0, 7)
        } else {
            self.random_int(0, 12)
        };
        match kind {
            0 => Value::Undefined,
            1 => Value::Null,
            2 => Value::Bool(self.random_bool(0.5)),
            3 => Value::Number(self.random_int(-1000, 1000) as f64 / 4.0),
            4 => Value::from(self.random_key()),
            5 => Value::date(self.random_int(0, 4_102_444_800_000) as f64),
            6 => Value::Function(self.pick(&state.functions).clone()),
            7 if !state.regexps.is_empty() => Value::RegExp(self.pick(&state.regexps).clone()),
            7 => Value::Null,
            8 => self.composite(Value::Array(ArrayRef::new()), depth, options, state),
            9 => self.composite(Value::Object(ObjectRef::record()), depth, options, state),
            10 => self.composite(Value::Map(MapRef::new()), depth, options, state),
            11 => self.composite(Value::Set(SetRef::new()), depth, options, state),
            _ => {
                let class = self.pick(&state.classes).clone();
                self.composite(Value::Object(ObjectRef::with_class(class)), depth, options, state)
            }
        }
    }

    fn composite(
        &self,
        shell: Value,
        depth: usize,
        options: &GraphOptions,
        state: &mut GraphState,
    ) -> Value {
        state.pool.push(shell.clone());
        state.ancestors.push(shell.clone());
        for _ in 0..self.random_int(0, options.max_width) {
            let child = self.node(depth + 1, options, state);
            match &shell {
                Value::Array(array) => array.push(child),
                Value::Set(set) => {
                    set.insert(child);
                }
                Value::Map(map) => {
                    let key = if self.random_bool(0.5) {
                        Value::from(self.random_key())
                    } else {
                        Value::Number(self.random_int(0, 9) as f64)
                    };
                    map.insert(key, child);
                }
                Value::Object(object) if self.random_bool(options.accessor_odds) => {
                    let getter = PropertyDescriptor::accessor(Some(self.fresh_getter()), None);
                    object.define(self.random_key(), getter);
                }
                Value::Object(object) if object.is_record() => {
                    object.set(&self.random_key(), child);
                }
                Value::Object(object) => {
                    let descriptor = PropertyDescriptor::data(child)
                        .writable(self.random_bool(0.7))
                        .enumerable(self.random_bool(0.7))
                        .configurable(self.random_bool(0.7));
                    object.define(self.random_key(), descriptor);
                }
                _ => {}
            }
        }
        state.ancestors.pop();
        shell
    }

    /// A getter returning a newly allocated `{ v, items: [..] }` on each call.
    fn fresh_getter(&self) -> FunctionRef {
        let v = self.random_int(-100, 100) as f64;
        let items: Vec<f64> = (0..self.random_int(0, 3))
            .map(|_| self.random_int(0, 9) as f64)
            .collect();
        FunctionRef::new("fresh", move |_, _| {
            Value::record([
                ("v", Value::from(v)),
                ("items", Value::array(items.iter().copied())),
            ])
        })
    }

    fn random_key(&self) -> String {
        let len = self.random_int(1, 3) as usize;
        self.random_string(len, KEY_CHARS)
    }
}

struct GraphState {
    pool: Vec<Value>,
    ancestors: Vec<Value>,
    classes: Vec<Class>,
    functions: Vec<FunctionRef>,
    regexps: Vec<RegExpRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use structural_value::Tag;

    #[test]
    fn test_fuzzer_random_int() {
        let fuzzer = Fuzzer::new(None);

        for _ in 0..100 {
            let n = fuzzer.random_int(1, 10);
            assert!((1..=10).contains(&n));
        }
    }

    #[test]
    fn test_fuzzer_pick() {
        let fuzzer = Fuzzer::new(None);
        let choices = vec!["a", "b", "c"];

        for _ in 0..100 {
            let picked = fuzzer.pick(&choices);
            assert!(choices.contains(picked));
        }
    }

    #[test]
    fn test_fuzzer_reproducible() {
        let fuzzer1 = Fuzzer::from_u64(42);
        let fuzzer2 = Fuzzer::from_u64(42);

        assert_eq!(fuzzer1.seed, fuzzer2.seed);
        for _ in 0..10 {
            assert_eq!(fuzzer1.random_int(0, 1000), fuzzer2.random_int(0, 1000));
        }
    }

    #[test]
    fn test_fuzzer_random_string() {
        let fuzzer = Fuzzer::new(None);

        let s = fuzzer.random_string(10, "abc");
        assert_eq!(s.len(), 10);
        assert!(s.chars().all(|c| "abc".contains(c)));
    }

    #[test]
    fn test_graph_covers_composite_kinds() {
        let mut seen = std::collections::HashSet::new();
        for seed in 0..200 {
            let graph = Fuzzer::from_u64(seed).graph(&GraphOptions::default());
            seen.insert(graph.tag());
        }
        for tag in [Tag::Array, Tag::Record, Tag::Map, Tag::Set, Tag::Opaque] {
            assert!(seen.contains(&tag), "no root of kind {tag}");
        }
    }

    #[test]
    fn test_graph_accessors_return_fresh_composites() {
        let options = GraphOptions {
            max_depth: 1,
            max_width: 4,
            share_odds: 0.0,
            cycle_odds: 0.0,
            accessor_odds: 1.0,
        };
        let mut accessors = 0;
        for seed in 0..50 {
            let graph = Fuzzer::from_u64(seed).graph(&options);
            let Some(object) = graph.as_object() else {
                continue;
            };
            for (key, descriptor) in object.descriptors().unwrap() {
                assert!(descriptor.is_accessor());
                let first = object.get(&key);
                let second = object.get(&key);
                assert_eq!(first.tag(), Tag::Record);
                assert!(!Value::same(&first, &second));
                accessors += 1;
            }
        }
        assert!(accessors > 0);
    }

    #[test]
    fn test_graph_with_certain_cycle() {
        let options = GraphOptions {
            max_depth: 1,
            max_width: 1,
            share_odds: 0.0,
            cycle_odds: 1.0,
            accessor_odds: 0.0,
        };
        for seed in 0..50 {
            let graph = Fuzzer::from_u64(seed).graph(&options);
            if let Value::Array(array) = &graph {
                for item in array.snapshot().unwrap() {
                    assert!(Value::same(&item, &graph));
                }
            }
        }
    }
}
