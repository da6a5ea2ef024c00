use {
    crate::it::{testrun::TestRun, tests::TestCase},
    log::LevelFilter,
};

#[macro_use]
mod test_error;
#[macro_use]
mod test_macros;
mod test_client;
mod test_keymap;
mod testrun;

fn run_test(test: &'static dyn TestCase) {
    let _ = simplelog::TestLogger::init(LevelFilter::Trace, simplelog::Config::default());
    log::info!("Running {}", test.name());
    let res = TestRun::new().and_then(|run| test.run(run));
    if let Err(e) = res {
        log::error!("{} failed: {}", test.name(), e);
        panic!("{}: {}", test.name(), e);
    }
}
