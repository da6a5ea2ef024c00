use {
    crate::{
        config::SeatConfig,
        it::{test_error::TestResult, testrun::TestRun},
    },
    std::rc::Rc,
};

testcase!();

/// The default seat takes its name from the configuration
fn test(run: Rc<TestRun>) -> TestResult {
    tassert_eq!(run.seat.name(), "seat0");

    let config = SeatConfig {
        name: "seat7".to_string(),
        ..Default::default()
    };
    let run = TestRun::with_config(config)?;
    tassert_eq!(run.seat.name(), "seat7");
    let client = run.create_client();
    client.bind_seat();
    let names = events_of!(client, SeatName);
    tassert_eq!(names.len(), 1);
    tassert_eq!(names[0].name.as_str(), "seat7");

    Ok(())
}
