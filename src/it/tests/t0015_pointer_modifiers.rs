use {
    crate::{
        backend::KeyState,
        it::{
            test_error::TestResult,
            test_keymap::{CONTROL_MASK, KEY_CAPSLOCK, KEY_LEFTCTRL},
            testrun::TestRun,
        },
        keyboard::{LED_CAPS_LOCK, LedsListener, MODIFIER_CTRL},
    },
    std::{cell::RefCell, rc::Rc},
};

testcase!();

#[derive(Default)]
struct Leds {
    changes: RefCell<Vec<u32>>,
}

impl LedsListener for Leds {
    fn leds_changed(&self, leds: u32) {
        self.changes.borrow_mut().push(leds);
    }
}

/// Modifier changes also reach the client under the pointer
fn test(run: Rc<TestRun>) -> TestResult {
    let c1 = run.create_client();
    let _devs1 = c1.bind_devices();
    let a = c1.map_surface(0, 0, 50, 50);
    let c2 = run.create_client();
    let _devs2 = c2.bind_devices();
    let b = c2.map_surface(100, 0, 50, 50);

    run.seat.activate(&a);
    run.move_to(110, 10);
    let enter = events_of!(c2, PointerEnter).pop().unwrap();
    tassert_eq!(enter.surface, b.id);
    let mods = events_of!(c2, KeyboardModifiers);
    tassert_eq!(mods.len(), 1);
    tassert_eq!(mods[0].serial, enter.serial);

    run.key(KEY_LEFTCTRL, KeyState::Pressed);
    tassert_eq!(run.seat.modifier_state(), MODIFIER_CTRL);
    let m1 = events_of!(c1, KeyboardModifiers);
    let m2 = events_of!(c2, KeyboardModifiers);
    tassert_eq!(m1.len(), 2);
    tassert_eq!(m2.len(), 2);
    tassert_eq!(m1[1].mods_depressed, CONTROL_MASK);
    tassert_eq!(m2[1].mods_depressed, CONTROL_MASK);
    tassert_eq!(m1[1].serial, m2[1].serial);
    tassert!(events_of!(c2, KeyboardKey).is_empty());

    run.move_to(10, 10);
    let m1_len = events_of!(c1, KeyboardModifiers).len();
    run.key(KEY_LEFTCTRL, KeyState::Released);
    tassert_eq!(events_of!(c1, KeyboardModifiers).len(), m1_len + 1);
    tassert_eq!(events_of!(c2, KeyboardModifiers).len(), 2);
    tassert_eq!(run.seat.modifier_state(), 0);

    let leds = Rc::new(Leds::default());
    run.seat.set_leds_listener(Some(leds.clone()));
    run.key(KEY_CAPSLOCK, KeyState::Pressed);
    run.key(KEY_CAPSLOCK, KeyState::Released);
    tassert_eq!(leds.changes.borrow().clone(), vec![LED_CAPS_LOCK]);
    tassert_eq!(run.seat.leds(), LED_CAPS_LOCK);
    tassert_eq!(run.seat.modifier_state(), 0);

    Ok(())
}
