use {
    crate::utils::errorfmt::ErrorFmt,
    std::{
        error::Error,
        fmt::{Debug, Display, Formatter},
    },
};

pub type TestResult<T = ()> = Result<T, TestError>;

pub struct TestError {
    error: Box<dyn Error + 'static>,
}

impl TestError {
    pub fn new<D: Display + 'static>(d: D) -> Self {
        Self {
            error: Box::new(DisplayError { msg: d }),
        }
    }
}

struct DisplayError<T: Display> {
    msg: T,
}

impl<T: Display> Debug for DisplayError<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.msg, f)
    }
}

impl<T: Display> Display for DisplayError<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.msg, f)
    }
}

impl<T: Display> Error for DisplayError<T> {}

impl Debug for TestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestError")
            .field("error", &self.error)
            .finish()
    }
}

impl Display for TestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        ErrorFmt(&*self.error).fmt(f)
    }
}

impl<T: Error + 'static> From<T> for TestError {
    fn from(error: T) -> Self {
        Self {
            error: Box::new(error),
        }
    }
}

macro_rules! bail {
    ($($tt:tt)*) => {{
        let msg = format!($($tt)*);
        return Err(crate::it::test_error::TestError::new(msg));
    }}
}
