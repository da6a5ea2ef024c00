use {
    crate::{
        backend::KeyState,
        fixed::Fixed,
        it::{test_error::TestResult, test_keymap::BTN_LEFT, testrun::TestRun},
    },
    std::rc::Rc,
};

testcase!();

/// The pointer focus stays on a surface while a button is held
fn test(run: Rc<TestRun>) -> TestResult {
    let client = run.create_client();
    let _devs = client.bind_devices();
    let a = client.map_surface(0, 0, 50, 50);
    let b = client.map_surface(50, 0, 50, 50);
    let pointer = run.seat.pointer().unwrap();

    run.move_to(10, 10);
    tassert_eq!(pointer.focus().map(|f| f.id), Some(a.id));

    run.button(BTN_LEFT, KeyState::Pressed);
    let buttons = events_of!(client, PointerButton);
    tassert_eq!(buttons.len(), 1);
    tassert_eq!(pointer.grab_serial(), buttons[0].serial);
    tassert_eq!(pointer.grab_button(), BTN_LEFT);
    tassert_eq!(pointer.grab_position(), (Fixed::from_int(10), Fixed::from_int(10)));

    run.move_to(60, 10);
    tassert_eq!(pointer.focus().map(|f| f.id), Some(a.id));
    tassert_eq!(pointer.current().0.map(|c| c.id), Some(b.id));
    tassert!(events_of!(client, PointerLeave).is_empty());
    let motion = events_of!(client, PointerMotion).pop().unwrap();
    tassert_eq!(motion.surface_x, Fixed::from_int(60));

    run.button(BTN_LEFT, KeyState::Pressed);
    tassert_eq!(pointer.button_count(), 1);
    tassert_eq!(events_of!(client, PointerButton).len(), 1);

    run.button(BTN_LEFT, KeyState::Released);
    tassert_eq!(pointer.button_count(), 0);
    tassert_eq!(pointer.focus().map(|f| f.id), Some(b.id));
    let leaves = events_of!(client, PointerLeave);
    tassert_eq!(leaves.len(), 1);
    tassert_eq!(leaves[0].surface, a.id);
    let enter = events_of!(client, PointerEnter).pop().unwrap();
    tassert_eq!(enter.surface, b.id);
    tassert_eq!(enter.surface_x, Fixed::from_int(10));

    run.button(BTN_LEFT, KeyState::Released);
    tassert_eq!(events_of!(client, PointerButton).len(), 2);
    tassert_eq!(run.idle.inhibitors.get(), 0);

    Ok(())
}
