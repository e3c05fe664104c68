#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    tests! {
        counter in closure is OK
        "1"
        "2"
        "3"
    }

    tests! {
        mutation_visible in closure is OK
        "2"
    }

    tests! {
        early_bound in closure is OK
        "global"
        "global"
    }

    tests! {
        close_over_parameter in closure is OK
        "param"
    }

    tests! {
        nested in closure is OK
        "ab"
    }
}
