#[derive(Clone, PartialEq, Debug)]
pub struct Cause<E> {
    pub message: E,
}

impl<E> Cause<E> {
    pub fn new(e: E) -> Self {
        Cause { message: e }
    }
}
