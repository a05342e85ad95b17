#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables)]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}

#[cfg(test)]
mod tests {
    #[derive(Debug)]
    enum Outcome {
        Accepted(u32),
        Rejected,
    }

    #[test]
    fn matches_pattern() {
        assert_matches!(Outcome::Accepted(3), Outcome::Accepted(_));
        assert_matches!(Outcome::Rejected, Outcome::Rejected);
    }

    #[test]
    fn matches_predicate() {
        assert_matches!(Outcome::Accepted(3), Outcome::Accepted(x) if *x == 3);
    }

    #[test]
    #[should_panic = "did not match pattern"]
    fn mismatch() {
        assert_matches!(Outcome::Rejected, Outcome::Accepted(_));
    }
}
