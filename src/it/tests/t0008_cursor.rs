use {
    crate::{
        fixed::Fixed,
        ifs::wl_surface::SurfaceRole,
        it::{test_error::TestResult, testrun::TestRun},
    },
    std::rc::Rc,
};

testcase!();

/// The cursor surface follows the pointer and never receives input
fn test(run: Rc<TestRun>) -> TestResult {
    let client = run.create_client();
    let devs = client.bind_devices();
    let a = client.map_surface(0, 0, 100, 100);
    run.move_to(10, 10);
    let serial = events_of!(client, PointerEnter)[0].serial;

    let c = client.create_surface();
    c.attach(Some((8, 8)), 0, 0);
    c.commit();
    devs.pointer.set_cursor(serial, Some(&c), 2, 3);
    tassert_eq!(run.seat.cursor().map(|s| s.id), Some(c.id));
    tassert_eq!(c.role(), SurfaceRole::Cursor);
    tassert!(c.is_mapped());
    tassert_eq!(c.position(), (8, 7));

    let found = run.state.tree.pick_surface(Fixed::from_int(9), Fixed::from_int(8));
    tassert_eq!(found.map(|f| f.surface.id), Some(a.id));

    run.move_to(20, 20);
    tassert_eq!(c.position(), (18, 17));

    c.attach(Some((8, 8)), 1, 1);
    c.commit();
    tassert_eq!(run.seat.cursor_hotspot(), (1, 2));
    tassert_eq!(c.position(), (19, 18));

    devs.pointer.set_cursor(serial.wrapping_add(1), None, 0, 0);
    tassert_eq!(run.seat.cursor().map(|s| s.id), Some(c.id));

    let other = run.create_client();
    let other_devs = other.bind_devices();
    other_devs.pointer.set_cursor(serial, None, 0, 0);
    tassert_eq!(run.seat.cursor().map(|s| s.id), Some(c.id));

    devs.pointer.set_cursor(serial, None, 0, 0);
    tassert!(run.seat.cursor().is_none());
    tassert!(!c.is_mapped());
    tassert_eq!(c.role(), SurfaceRole::None);

    let e = client.create_surface();
    e.attach(Some((4, 4)), 0, 0);
    e.commit();
    devs.pointer.set_cursor(serial, Some(&e), 0, 0);
    tassert!(e.is_mapped());
    run.state.destroy_surface(&e);
    tassert!(run.seat.cursor().is_none());
    tassert!(!e.is_mapped());

    let d = client.create_surface();
    run.seat.set_drag_icon(Some(&d));
    tassert_eq!(d.role(), SurfaceRole::DndIcon);
    devs.pointer.set_cursor(serial, Some(&d), 0, 0);
    tassert!(client.is_shut_down());
    let errors = events_of!(client, DisplayError);
    tassert_eq!(errors.len(), 1);
    tassert_eq!(errors[0].object_id, d.id);
    tassert!(run.seat.cursor().is_none());

    Ok(())
}
