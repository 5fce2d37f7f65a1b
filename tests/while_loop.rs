#[macro_use]
mod common;

#[cfg(test)]
mod while_loop {
    tests! {
        count in while_loop is OK
        "0"
        "1"
        "2"
    }

    tests! {
        return_inside in while_loop is OK
        "done"
    }
}
