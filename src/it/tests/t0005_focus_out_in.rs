use {
    crate::{
        backend::{KeyState, KeyStateUpdate},
        it::{
            test_error::TestResult,
            test_keymap::{CONTROL_MASK, KEY_A, KEY_LEFTCTRL, KEY_S},
            testrun::TestRun,
        },
        keyboard::MODIFIER_CTRL,
    },
    std::rc::Rc,
};

testcase!();

/// Losing the input focus releases all keys and regaining it restores the
/// keyboard focus
fn test(run: Rc<TestRun>) -> TestResult {
    let client = run.create_client();
    let _devs = client.bind_devices();
    let a = client.map_surface(0, 0, 10, 10);
    run.seat.activate(&a);
    let kb = run.seat.keyboard().unwrap();

    run.key(KEY_LEFTCTRL, KeyState::Pressed);
    run.key(KEY_A, KeyState::Pressed);
    run.key(KEY_S, KeyState::Pressed);
    tassert_eq!(run.seat.modifier_state(), MODIFIER_CTRL);
    tassert_eq!(run.idle.inhibitors.get(), 3);

    run.seat.notify_keyboard_focus_out();
    tassert!(kb.keys().is_empty());
    tassert_eq!(run.seat.modifier_state(), 0);
    tassert!(kb.focus().is_none());
    tassert_eq!(run.seat.saved_keyboard_focus().map(|s| s.id), Some(a.id));
    tassert_eq!(run.idle.inhibitors.get(), 0);
    tassert_eq!(events_of!(client, KeyboardLeave).len(), 1);
    let mods = events_of!(client, KeyboardModifiers);
    tassert_eq!(mods.last().unwrap().mods_depressed, 0);

    run.seat.notify_keyboard_focus_in(&[], KeyStateUpdate::Automatic);
    tassert_eq!(kb.focus().map(|f| f.id), Some(a.id));
    tassert!(run.seat.saved_keyboard_focus().is_none());
    let enters = events_of!(client, KeyboardEnter);
    tassert_eq!(enters.len(), 2);
    tassert!(enters[1].keys.is_empty());

    run.seat.notify_keyboard_focus_out();
    run.seat
        .notify_keyboard_focus_in(&[KEY_LEFTCTRL], KeyStateUpdate::Automatic);
    tassert_eq!(run.seat.modifier_state(), MODIFIER_CTRL);
    tassert_eq!(run.idle.inhibitors.get(), 1);
    let enters = events_of!(client, KeyboardEnter);
    tassert_eq!(enters.len(), 3);
    tassert_eq!(enters[2].keys.clone(), vec![KEY_LEFTCTRL]);
    let mods = events_of!(client, KeyboardModifiers);
    tassert_eq!(mods.last().unwrap().mods_depressed, CONTROL_MASK);
    tassert_eq!(mods.last().unwrap().serial, enters[2].serial);

    Ok(())
}
