use {
    crate::{
        fixed::Fixed,
        it::{test_error::TestResult, testrun::TestRun},
        rect::Rect,
    },
    std::rc::Rc,
};

testcase!();

/// Relative motion cannot leave the outputs
fn test(run: Rc<TestRun>) -> TestResult {
    let px = |n| Fixed::from_int(n);

    run.seat.notify_motion(0, px(1000), px(0));
    tassert_eq!(run.pointer_position(), (799, 100));

    run.seat.notify_motion(0, px(-2000), px(-2000));
    tassert_eq!(run.pointer_position(), (0, 0));

    run.state
        .outputs
        .borrow_mut()
        .extend(Rect::new_sized(800, 0, 800, 600));
    run.seat.notify_motion(0, px(900), px(0));
    tassert_eq!(run.pointer_position(), (900, 0));

    run.seat.notify_pointer_focus(Some(0), px(10), px(10));
    tassert_eq!(run.pointer_position(), (10, 10));
    tassert!(run.state.focus.get());
    run.seat.notify_pointer_focus(None, px(0), px(0));
    tassert!(!run.state.focus.get());

    run.state.outputs.borrow_mut().clear();
    run.move_to(5000, 5000);
    tassert_eq!(run.pointer_position(), (5000, 5000));

    Ok(())
}
