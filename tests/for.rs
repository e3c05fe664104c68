#[macro_use]
mod common;

#[cfg(test)]
mod _for {
    tests! {
        scope in for is OK
        "0"
        "after"
    }

    tests! {
        no_clauses in for is OK
        "once"
    }

    tests! {
        condition_only in for is OK
        "0"
        "1"
    }

    tests! {
        initializer_expression in for is OK
        "0"
        "1"
    }
}
