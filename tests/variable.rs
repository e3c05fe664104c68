#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        uninitialized in variable is ERR
        "[line 2] runtime error: variable 'x' must be initialized before use"
    }

    tests! {
        assign_then_read in variable is OK
        "1"
    }

    tests! {
        undefined in variable is ERR
        "[line 1] runtime error: undefined variable 'missing'"
    }

    tests! {
        redeclare_global in variable is OK
        "2"
    }

    tests! {
        duplicate_local in variable is ERR
        "[line 3] error at 'a': already a variable with name 'a' in this scope"
    }

    tests! {
        own_initializer in variable is ERR
        "[line 3] error at 'a': cannot read local variable in its own initializer"
    }

    tests! {
        shadow in variable is OK
        "local"
        "global"
    }

    tests! {
        duplicate_parameter in variable is ERR
        "[line 1] error at 'arg': already a variable with name 'arg' in this scope"
    }
}
