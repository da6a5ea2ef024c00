use {
    crate::{
        fixed::Fixed,
        ifs::wl_surface::SurfaceRole,
        it::{test_error::TestResult, testrun::TestRun},
        utils::rc_eq::rc_eq,
    },
    std::rc::Rc,
};

testcase!();

/// The drag icon follows the pointer and can be swapped mid-drag
fn test(run: Rc<TestRun>) -> TestResult {
    let client = run.create_client();
    let devs = client.bind_devices();
    tassert_eq!(run.pointer_position(), (100, 100));

    let icon1 = client.create_surface();
    icon1.attach(Some((10, 10)), 0, 0);
    icon1.commit();
    run.seat.set_drag_icon(Some(&icon1));
    tassert_eq!(run.seat.drag_icon().map(|s| s.id), Some(icon1.id));
    tassert_eq!(icon1.role(), SurfaceRole::DndIcon);
    tassert!(icon1.is_mapped());
    tassert_eq!(icon1.position(), (100, 100));

    run.seat.notify_motion(0, Fixed::from_int(5), Fixed::from_int(5));
    tassert_eq!(icon1.position(), (105, 105));

    let icon2 = client.create_surface();
    icon2.attach(Some((10, 10)), 0, 0);
    icon2.commit();
    run.seat.set_drag_icon(Some(&icon2));
    tassert!(!icon1.is_mapped());
    tassert_eq!(icon1.role(), SurfaceRole::None);
    tassert_eq!(run.seat.drag_icon().map(|s| s.id), Some(icon2.id));
    tassert_eq!(icon2.position(), (105, 105));

    icon2.attach(Some((10, 10)), 2, 3);
    icon2.commit();
    tassert_eq!(icon2.position(), (107, 108));

    run.seat.set_drag_icon(None);
    tassert!(run.seat.drag_icon().is_none());
    tassert!(!icon2.is_mapped());
    tassert_eq!(icon2.role(), SurfaceRole::None);
    tassert!(!icon2.accepts_input(1, 1));

    let a = client.map_surface(0, 0, 200, 200);
    run.move_to(50, 50);
    let serial = events_of!(client, PointerEnter)[0].serial;
    let sprite = client.create_surface();
    sprite.attach(Some((4, 4)), 0, 0);
    sprite.commit();
    devs.pointer.set_cursor(serial, Some(&sprite), 0, 0);
    let icon3 = client.create_surface();
    icon3.attach(Some((4, 4)), 0, 0);
    icon3.commit();
    run.seat.set_drag_icon(Some(&icon3));
    let order = run.state.tree.stacking_order();
    tassert_eq!(order.len(), 3);
    tassert!(rc_eq(&order[0], &a));
    tassert!(rc_eq(&order[1], &icon3));
    tassert!(rc_eq(&order[2], &sprite));

    run.state.destroy_surface(&icon3);
    tassert!(run.seat.drag_icon().is_none());
    run.state.update_drag_surfaces();
    tassert_eq!(run.state.tree.stacking_order().len(), 2);

    Ok(())
}
