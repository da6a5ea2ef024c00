use {
    crate::{
        fixed::Fixed,
        it::{test_error::TestResult, testrun::TestRun},
    },
    std::rc::Rc,
};

testcase!();

/// Hotspots and attach offsets at the limits of i32 wrap around
fn test(run: Rc<TestRun>) -> TestResult {
    let client = run.create_client();
    let devs = client.bind_devices();
    client.map_surface(0, 0, 100, 100);
    run.move_to(10, 10);
    let serial = events_of!(client, PointerEnter)[0].serial;

    let c = client.create_surface();
    c.attach(Some((8, 8)), 0, 0);
    c.commit();
    devs.pointer.set_cursor(serial, Some(&c), i32::MIN, i32::MAX);
    tassert_eq!(run.seat.cursor().map(|s| s.id), Some(c.id));
    tassert_eq!(run.seat.cursor_hotspot(), (i32::MIN, i32::MAX));
    tassert_eq!(
        c.position(),
        (10i32.wrapping_sub(i32::MIN), 10i32.wrapping_sub(i32::MAX))
    );

    c.attach(Some((8, 8)), i32::MAX, i32::MIN);
    c.commit();
    tassert_eq!(run.seat.cursor_hotspot(), (1, -1));
    tassert_eq!(c.position(), (9, 11));

    run.move_to(20, 20);
    tassert_eq!(c.position(), (19, 21));

    let icon = client.create_surface();
    icon.attach(Some((4, 4)), 0, 0);
    icon.commit();
    run.seat.set_drag_icon(Some(&icon));
    icon.attach(Some((4, 4)), i32::MAX, i32::MIN);
    icon.commit();
    run.seat
        .notify_motion(0, Fixed::from_int(i32::MAX), Fixed::from_int(i32::MIN));
    tassert_eq!(run.seat.drag_icon().map(|s| s.id), Some(icon.id));

    tassert!(!client.is_shut_down());
    Ok(())
}
