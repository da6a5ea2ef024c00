use {
    crate::{
        backend::KeyState,
        ifs::wl_seat::wl_pointer::{PRESSED, RELEASED},
        it::{test_error::TestResult, test_keymap::KEY_A, testrun::TestRun},
    },
    std::rc::Rc,
};

testcase!();

/// A release of a key that is not down is dropped
fn test(run: Rc<TestRun>) -> TestResult {
    let client = run.create_client();
    let _devs = client.bind_devices();
    let a = client.map_surface(0, 0, 10, 10);
    run.seat.activate(&a);

    run.key(KEY_A, KeyState::Pressed);
    tassert_eq!(run.idle.inhibitors.get(), 1);
    run.key(KEY_A, KeyState::Released);
    run.key(KEY_A, KeyState::Released);

    let keys = events_of!(client, KeyboardKey);
    tassert_eq!(keys.len(), 2);
    tassert_eq!(keys[0].key, KEY_A);
    tassert_eq!(keys[0].state, PRESSED);
    tassert_eq!(keys[1].state, RELEASED);
    tassert!(keys[1].serial > keys[0].serial);

    let kb = run.seat.keyboard().unwrap();
    tassert!(kb.keys().is_empty());
    tassert_eq!(kb.grab_key(), KEY_A);
    tassert_eq!(run.idle.inhibitors.get(), 0);

    Ok(())
}
