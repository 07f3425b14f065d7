use super::{output_of, run_script};
use crate::ErrorCategory;
use pretty_assertions::assert_eq;

#[test]
fn map_then_collect_leaves_source_unchanged() {
    let out = output_of(
        r#"
var v = [1, 2, 3];
var doubled = v.map(|x| x * 2).collect();
print(doubled);
print(v);
"#,
    );
    assert_eq!(out, "[2, 4, 6]\n[1, 2, 3]\n");
}

#[test]
fn exhausted_map_keeps_returning_sentinel() {
    let out = output_of(
        r#"
var m = [1].map(|x| x + 1);
print(m.__next__());
print(m.__next__() == Sentinel);
print(m.__next__() == Sentinel);
"#,
    );
    assert_eq!(out, "2\ntrue\ntrue\n");
}

#[test]
fn map_does_not_pull_from_source_after_exhaustion() {
    let out = output_of(
        r#"
class Flaky < Iter {
  fn __init__(self) { self.calls = 0; }
  fn __iter__(self) { return self; }
  fn __next__(self) {
    self.calls = self.calls + 1;
    if self.calls == 2 { return Sentinel; }
    return self.calls;
  }
}
var f = Flaky();
var m = f.map(|x| x * 10);
print(m.__next__());
print(m.__next__() == Sentinel);
print(m.__next__() == Sentinel);
print(f.calls);
"#,
    );
    assert_eq!(out, "10\ntrue\ntrue\n2\n");
}

#[test]
fn map_is_lazy() {
    let out = output_of(
        r#"
var seen = [];
var m = [1, 2].map(|x| seen.push(x));
print(seen.len());
m.collect();
print(seen);
"#,
    );
    assert_eq!(out, "0\n[1, 2]\n");
}

#[test]
fn user_iterator_with_for_and_collect() {
    let out = output_of(
        r#"
class Countdown < Iter {
  fn __init__(self, from) { self.from = from; }
  fn __iter__(self) { return CountdownIter(self.from); }
}
class CountdownIter {
  fn __init__(self, n) { self.n = n; }
  fn __next__(self) {
    if self.n == 0 { return Sentinel; }
    self.n -= 1;
    return self.n + 1;
  }
}
var c = Countdown(3);
for x in c { print(x); }
print(c.collect());
print(c.filter(|x| x != 2).collect());
"#,
    );
    assert_eq!(out, "3\n2\n1\n[3, 2, 1]\n[3, 1]\n");
}

#[test]
fn for_over_range_string_and_vec() {
    let out = output_of(
        r#"
for i in 0..3 { print(i); }
for c in "ab" { print(c); }
for x in [nil, true] { print(x); }
"#,
    );
    assert_eq!(out, "0\n1\n2\na\nb\nnil\ntrue\n");
}

#[test]
fn filter_and_chained_adapters() {
    let out = output_of(
        r#"
print((1..6).filter(|x| x > 2).map(|x| x * x).collect());
print("abc".len());
"#,
    );
    assert_eq!(out, "[9, 16, 25]\n3\n");
}

#[test]
fn vec_methods() {
    let out = output_of(
        r#"
var v = [1, 2];
v.push(3).push(4);
print(v.len());
print(v.pop());
print(v[0]);
print(v[-1]);
v[1] = "two";
print(v);
v[0] += 10;
print(v[0]);
"#,
    );
    assert_eq!(out, "4\n4\n1\n3\n[1, two, 3]\n11\n");
}

#[test]
fn vec_index_errors() {
    let run = run_script("var v = [1];\nprint(v[1]);");
    assert_eq!(
        run.error_text().as_deref(),
        Some("IndexError: Vec index out of bounds.\n[line 2] in script")
    );
    let run = run_script("var v = [1];\nprint(v[0.5]);");
    assert_eq!(
        run.error.map(|e| e.to_string()),
        Some("TypeError: Expected an integer but found '0.5'.\n[line 2] in script".to_string())
    );
    let run = run_script("[].pop();");
    assert_eq!(
        run.error.map(|e| e.category()),
        Some(ErrorCategory::ValueError)
    );
}

#[test]
fn iterating_a_number_is_a_type_error() {
    let run = run_script("for x in 3 { print(x); }");
    assert_eq!(
        run.error.map(|e| e.message()).as_deref(),
        Some("Cannot iterate over a value of type number.")
    );
}

#[test]
fn vec_iterator_sees_pushes_during_iteration() {
    let out = output_of(
        r#"
var v = [1];
for x in v {
  if x < 3 { v.push(x + 1); }
}
print(v);
"#,
    );
    assert_eq!(out, "[1, 2, 3]\n");
}

#[test]
fn iterators_display_as_instances() {
    let out = output_of("print([1].map(|x| x));\nprint([1].__iter__());\nprint(0..2);");
    assert_eq!(out, "Map instance\nVecIter instance\nRange(0, 2)\n");
}

#[test]
fn self_referencing_vec_prints_ellipsis() {
    let out = output_of("var v = [1];\nv.push(v);\nprint(v);");
    assert_eq!(out, "[1, [...]]\n");
}

#[test]
fn self_referencing_vecs_compare_structurally() {
    let out = output_of(
        r#"
var a = [];
a.push(a);
var b = [];
b.push(b);
print(a == b);
var c = [1];
c.push(c);
print(a == c);
print(a == a);
"#,
    );
    assert_eq!(out, "true\nfalse\ntrue\n");
}
