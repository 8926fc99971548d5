use std::collections::HashMap;

use proptest::prelude::*;
use structural_util::fuzzer::{Fuzzer, GraphOptions};
use structural_util::{clone_with, equal_excluding, CloneOptions};
use structural_value::{Identity, PropertyKind, Value};

/// Walks original and copy side by side and checks that the copy has the same
/// sharing topology: every original composite maps to exactly one distinct
/// copy, functions are shared, dates and regexes are fresh.
struct ShapeCheck {
    forward: HashMap<Identity, Identity>,
    backward: HashMap<Identity, Identity>,
}

impl ShapeCheck {
    fn new() -> Self {
        Self {
            forward: HashMap::new(),
            backward: HashMap::new(),
        }
    }

    fn check(&mut self, original: &Value, copy: &Value) -> Result<(), String> {
        if original.tag() != copy.tag() {
            return Err(format!("tag {} became {}", original.tag(), copy.tag()));
        }
        match (original, copy) {
            (Value::Function(_), _) => {
                return expect(Value::same(original, copy), "function was not shared");
            }
            (Value::Date(_), _) | (Value::RegExp(_), _) => {
                return expect(!Value::same(original, copy), "date or regex was shared");
            }
            _ if original.is_primitive() => {
                return expect(Value::same(original, copy), "primitive changed");
            }
            _ => {}
        }

        let (o, c) = match (original.identity(), copy.identity()) {
            (Some(o), Some(c)) => (o, c),
            _ => return Err("composite without identity".to_string()),
        };
        if o == c {
            return Err(format!("{:?} was not copied", original.tag()));
        }
        match (self.forward.get(&o), self.backward.get(&c)) {
            (Some(prev), _) => return expect(*prev == c, "shared original copied twice"),
            (None, Some(_)) => return Err("two originals share one copy".to_string()),
            (None, None) => {
                self.forward.insert(o, c);
                self.backward.insert(c, o);
            }
        }

        match (original, copy) {
            (Value::Array(a), Value::Array(b)) => {
                self.check_all(&a.snapshot().unwrap(), &b.snapshot().unwrap())
            }
            (Value::Set(a), Value::Set(b)) => {
                self.check_all(&a.members().unwrap(), &b.members().unwrap())
            }
            (Value::Map(a), Value::Map(b)) => {
                let (xs, ys) = (a.entries().unwrap(), b.entries().unwrap());
                expect(xs.len() == ys.len(), "map size changed")?;
                for ((xk, xv), (yk, yv)) in xs.iter().zip(&ys) {
                    expect(Value::same(xk.value(), yk.value()), "map key changed")?;
                    self.check(xv, yv)?;
                }
                Ok(())
            }
            (Value::Object(a), Value::Object(b)) => {
                let (xs, ys) = (a.descriptors().unwrap(), b.descriptors().unwrap());
                expect(xs.len() == ys.len(), "property count changed")?;
                for ((xk, xd), (yk, yd)) in xs.iter().zip(&ys) {
                    expect(xk == yk, "property order changed")?;
                    // Getter results are fresh on every read and have no
                    // topology of their own to compare.
                    if let (PropertyKind::Data { value: x, .. }, PropertyKind::Data { value: y, .. }) =
                        (&xd.kind, &yd.kind)
                    {
                        self.check(x, y)?;
                    }
                }
                Ok(())
            }
            _ => Err("unexpected composite pair".to_string()),
        }
    }

    fn check_all(&mut self, xs: &[Value], ys: &[Value]) -> Result<(), String> {
        expect(xs.len() == ys.len(), "length changed")?;
        for (x, y) in xs.iter().zip(ys) {
            self.check(x, y)?;
        }
        Ok(())
    }
}

fn expect(condition: bool, message: &str) -> Result<(), String> {
    if condition {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

fn options() -> GraphOptions {
    GraphOptions {
        max_depth: 5,
        max_width: 5,
        share_odds: 0.2,
        cycle_odds: 0.1,
        accessor_odds: 0.2,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn copy_is_deeply_equal(seed in any::<u64>()) {
        let graph = Fuzzer::from_u64(seed).graph(&options());
        let copy = clone_with(&graph, &CloneOptions::default()).unwrap();
        prop_assert!(equal_excluding::<&str>(&copy, &graph, &[]));
    }

    #[test]
    fn copy_preserves_sharing_topology(seed in any::<u64>()) {
        let graph = Fuzzer::from_u64(seed).graph(&options());
        let copy = clone_with(&graph, &CloneOptions::default()).unwrap();
        let outcome = ShapeCheck::new().check(&graph, &copy);
        prop_assert!(outcome.is_ok(), "{:?}", outcome);
    }

    #[test]
    fn structural_copy_is_deeply_equal(seed in any::<u64>()) {
        let graph = Fuzzer::from_u64(seed).graph(&options());
        let copy = clone_with(&graph, &CloneOptions::structural()).unwrap();
        prop_assert!(equal_excluding::<&str>(&copy, &graph, &[]));
        let outcome = ShapeCheck::new().check(&graph, &copy);
        prop_assert!(outcome.is_ok(), "{:?}", outcome);
    }
}
