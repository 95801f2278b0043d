use pantaneiro::config::ScrollerConfig;
use pantaneiro::scroller::DifficultyScroller;
use speculoos::prelude::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_speed_grows_with_time() {
    let mut scroller = DifficultyScroller::new(&ScrollerConfig::default());

    scroller.update(10.0);

    assert!(close(scroller.multiplier(), 1.2));
    assert!(close(scroller.current_speed(), 12.0));
    assert!(close(scroller.offset(), 100.0));
}

#[test]
fn test_multiplier_is_capped() {
    let mut scroller = DifficultyScroller::new(&ScrollerConfig::default());

    for _ in 0..120 {
        scroller.update(1.0);
    }

    assert!(close(scroller.multiplier(), 2.0));
    assert!(close(scroller.current_speed(), 20.0));
}

#[test]
fn test_stop_freezes_offset_and_timer() {
    let mut scroller = DifficultyScroller::new(&ScrollerConfig::default());
    scroller.update(1.0);
    let (offset, timer) = (scroller.offset(), scroller.timer());

    scroller.stop();
    scroller.update(5.0);

    assert_that(&scroller.is_stopped()).is_true();
    assert_that(&scroller.offset()).is_equal_to(offset);
    assert_that(&scroller.timer()).is_equal_to(timer);

    scroller.resume();
    scroller.update(1.0);
    assert_that(&scroller.offset()).is_greater_than(offset);
}

#[test]
fn test_reset_restores_initial_state() {
    let config = ScrollerConfig {
        initial_speed: 200.0,
        ..ScrollerConfig::default()
    };
    let mut scroller = DifficultyScroller::new(&config);
    scroller.update(30.0);
    scroller.stop();

    scroller.reset();

    assert_that(&scroller.offset()).is_equal_to(0.0);
    assert_that(&scroller.timer()).is_equal_to(0.0);
    assert_that(&scroller.current_speed()).is_equal_to(200.0);
    assert_that(&scroller.is_stopped()).is_false();
}
