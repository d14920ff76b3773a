use super::{Cause, ValidationError};

pub type Valid<A, E> = Result<A, ValidationError<E>>;

pub trait ValidExtensions<A, E>: Sized {
    fn fail(e: E) -> Valid<A, E> {
        Err((vec![Cause::new(e)]).into())
    }

    fn succeed(a: A) -> Valid<A, E> {
        Ok(a)
    }
}

impl<A, E> ValidExtensions<A, E> for Result<A, ValidationError<E>> {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Valid, ValidExtensions};
    use crate::core::valid::{Cause, ValidationError};

    #[test]
    fn test_fail() {
        let result: Valid<(), i32> = Valid::fail(1);
        assert_eq!(result, Err(ValidationError::from(Cause::new(1))));
    }

    #[test]
    fn test_succeed() {
        let result: Valid<u8, i32> = Valid::succeed(7);
        assert_eq!(result, Ok(7));
    }
}
