use {
    std::{
        error::Error,
        fmt::{Debug, Display, Formatter},
        io,
    },
    uapi::{Errno, c},
};

#[derive(Copy, Clone, Eq, PartialEq)]
pub struct OsError(pub c::c_int);

impl OsError {
    pub fn errno(self) -> c::c_int {
        self.0
    }
}

impl From<Errno> for OsError {
    fn from(e: Errno) -> Self {
        Self(e.0)
    }
}

impl From<io::Error> for OsError {
    fn from(e: io::Error) -> Self {
        match e.raw_os_error() {
            Some(v) => Self(v),
            None => Self(c::EINVAL),
        }
    }
}

impl Default for OsError {
    fn default() -> Self {
        Errno::default().into()
    }
}

impl Error for OsError {}

impl Display for OsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let err = io::Error::from_raw_os_error(self.0);
        write!(f, "{} (os error {})", err.kind(), self.0)
    }
}

impl Debug for OsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
