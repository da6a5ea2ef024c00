macro_rules! tassert {
    ($cond:expr) => {
        if !$cond {
            bail!("Assert `{}` failed ({}:{})", stringify!($cond), file!(), line!());
        }
    };
}

macro_rules! tassert_eq {
    ($left:expr, $right:expr) => {{
        let left = $left;
        let right = $right;
        if left != right {
            bail!(
                "Assert `{} = {:?} = {:?} = {}` failed ({}:{})",
                stringify!($left),
                left,
                right,
                stringify!($right),
                file!(),
                line!()
            );
        }
    }};
}

/// Collects the events of one wire variant that a test client received.
macro_rules! events_of {
    ($client:expr, $variant:ident) => {
        $client
            .events()
            .into_iter()
            .filter_map(|e| match e {
                crate::wire::WireEvent::$variant(e) => Some(e),
                _ => None,
            })
            .collect::<Vec<_>>()
    };
}
