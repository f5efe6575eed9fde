use proptest::strategy::{Strategy, ValueTree};
use proptest::test_runner::TestRunner;

/// Finds the simplest value of `strategy` satisfying `condition`
///
/// Draws with a deterministic runner until a value matches, then shrinks it for as
/// long as the condition keeps holding.
pub(crate) fn minimal<S, F>(strategy: &S, condition: F) -> S::Value
where
    S: Strategy,
    F: Fn(&S::Value) -> bool,
{
    let mut runner = TestRunner::deterministic();
    for _ in 0..10_000 {
        let mut tree = strategy
            .new_tree(&mut runner)
            .expect("strategy should produce a value");
        if !condition(&tree.current()) {
            continue;
        }

        let mut best = tree.current();
        if !tree.simplify() {
            return best;
        }
        loop {
            if condition(&tree.current()) {
                best = tree.current();
                if !tree.simplify() {
                    break;
                }
            } else if !tree.complicate() {
                break;
            }
        }
        return best;
    }
    panic!("no value satisfied the condition");
}
