#[macro_use]
mod common;

#[cfg(test)]
mod block {
    tests! {
        scope_reuse in block is OK
        "first"
        "second"
    }

    tests! {
        empty in block is OK
        "ok"
    }

    tests! {
        nested in block is OK
        "globalmiddle"
    }
}
