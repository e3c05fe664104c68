#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        declare_and_print in class is OK
        "Foo"
    }

    tests! {
        instance in class is OK
        "Foo instance"
    }

    tests! {
        greeter in class is OK
        "hi world"
    }

    tests! {
        methods in class is OK
        "9"
    }

    tests! {
        this_outside in class is ERR
        "[line 1] error at 'this': cannot use 'this' outside of a class"
    }

    tests! {
        empty_class_arity in class is ERR
        "[line 2] runtime error: expected 0 arguments but got 1"
    }
}
