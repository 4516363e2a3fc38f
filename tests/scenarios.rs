use std::cell::Cell;
use std::rc::Rc;

use backdrop_engine::sim::{BEAM_LIFESPAN, TICK_INTERVAL, Z_MAX};
use backdrop_engine::{
    AbstractFieldRenderer, AnimationDriver, CommandBuffer, DriverState, Renderer, StarfieldRenderer, Surface, seeded,
};

const STEP: f64 = 16.0;

fn counted_field(seed: u64) -> (AbstractFieldRenderer, Rc<Cell<u32>>) {
    let mut field = AbstractFieldRenderer::new(1280, 720, seeded(seed));
    let ticks = Rc::new(Cell::new(0));
    let counter = ticks.clone();
    field.on_tick(move || counter.set(counter.get() + 1));
    (field, ticks)
}

#[test]
fn ten_seconds_of_frames_tick_twice() {
    let (field, ticks) = counted_field(2024);
    let mut driver = AnimationDriver::new(field, Some(CommandBuffer::new(0, 0)));
    assert!(driver.mount(1280, 720));

    let mut fired_at = Vec::new();
    let mut t = STEP;
    while t <= 10_000.0 + STEP {
        let before = ticks.get();
        driver.frame(t);
        if ticks.get() != before {
            fired_at.push(t);
        }
        if let Some(s) = driver.surface_mut() {
            s.clear();
        }
        t += STEP;
    }

    assert_eq!(ticks.get(), 2);
    assert_eq!(fired_at, vec![5008.0, 10016.0]);
}

#[test]
fn ticks_never_closer_than_interval_nor_starved() {
    let (mut field, _) = counted_field(7);
    let fired = Rc::new(std::cell::RefCell::new(Vec::new()));
    let now = Rc::new(Cell::new(0.0));
    {
        let fired = fired.clone();
        let now = now.clone();
        field.on_tick(move || fired.borrow_mut().push(now.get()));
    }

    let mut buf = CommandBuffer::new(1280, 720);
    let mut t = 0.0;
    // Uneven frame pacing, ~60 s
    let pattern = [16.0, 17.0, 33.0, 16.0, 50.0, 8.0];
    let mut k = 0;
    while t < 60_000.0 {
        t += pattern[k % pattern.len()];
        k += 1;
        now.set(t);
        field.step(t, &mut buf);
        buf.clear();
    }

    let fired = fired.borrow();
    assert!(fired.len() >= 11);
    for pair in fired.windows(2) {
        assert!(pair[1] - pair[0] >= TICK_INTERVAL);
        // The largest frame gap is 50 ms
        assert!(pair[1] - pair[0] < TICK_INTERVAL + 50.0);
    }
}

#[test]
fn star_closes_in_then_recycles() {
    let mut sf = StarfieldRenderer::new(800, 600, seeded(1));
    let mut buf = CommandBuffer::new(800, 600);
    sf.stars_mut().z[0] = 10.0;
    sf.stars_mut().speed[0] = 1.0;

    sf.step(STEP, &mut buf);
    assert_eq!(sf.stars().z[0], 8.0);

    for f in 2..=5 {
        sf.step(f as f64 * STEP, &mut buf);
    }
    let z = sf.stars().z[0];
    assert!(z > 0.0 && z <= Z_MAX);
    assert_eq!(z, Z_MAX);
}

#[test]
fn beam_present_for_whole_lifespan_only() {
    let (mut field, _) = counted_field(3);
    let mut buf = CommandBuffer::new(1280, 720);
    let birth = 500.0;
    field.beams_mut().spawn(&mut seeded(77), 1280.0, 720.0, birth);
    let hue = field.beams().hue[0];
    let present = |f: &AbstractFieldRenderer| {
        let b = f.beams();
        (0..b.n).any(|i| b.birth[i] == birth && b.hue[i] == hue)
    };

    field.step(birth, &mut buf);
    assert!(present(&field));
    field.step(birth + BEAM_LIFESPAN - 0.001, &mut buf);
    assert!(present(&field));
    field.step(birth + BEAM_LIFESPAN, &mut buf);
    assert!(!present(&field));
}

#[test]
fn unmount_mid_animation_stops_everything() {
    let (field, ticks) = counted_field(11);
    let mut driver = AnimationDriver::new(field, Some(CommandBuffer::new(0, 0)));
    driver.mount(1280, 720);

    let mut t = STEP;
    while t < 3000.0 {
        assert!(driver.frame(t));
        t += STEP;
    }
    driver.unmount();
    assert_eq!(driver.state(), DriverState::Stopped);

    let drawn = driver.surface().map(|s| s.len());
    let fired = ticks.get();
    while t < 20_000.0 {
        assert!(!driver.frame(t));
        t += STEP;
    }
    assert_eq!(driver.surface().map(|s| s.len()), drawn);
    assert_eq!(ticks.get(), fired);
    assert_eq!(fired, 0);
}

#[test]
fn unavailable_surface_never_draws() {
    let (field, ticks) = counted_field(5);
    let mut driver: AnimationDriver<_, CommandBuffer> = AnimationDriver::new(field, None);
    assert!(!driver.mount(1280, 720));
    for k in 1..1000 {
        assert!(!driver.frame(k as f64 * STEP));
    }
    assert_eq!(ticks.get(), 0);
    assert_eq!(driver.frames(), 0);
}

#[test]
fn layers_run_independently() {
    let mut stars = AnimationDriver::new(StarfieldRenderer::new(640, 480, seeded(1)), Some(CommandBuffer::new(0, 0)));
    let (field, _) = counted_field(1);
    let mut blobs = AnimationDriver::new(field, Some(CommandBuffer::new(0, 0)));
    stars.mount(640, 480);
    blobs.mount(1024, 768);

    for k in 1..=10 {
        stars.frame(k as f64 * STEP);
    }
    stars.unmount();
    assert!(blobs.frame(200.0));
    assert_eq!(blobs.surface().map(|s| s.size()), Some((1024, 768)));
    assert_eq!(stars.frames(), 10);

    // Resizing one layer leaves the other alone
    blobs.resize(800, 600);
    assert_eq!(stars.surface().map(|s| s.size()), Some((640, 480)));
    assert_eq!(blobs.surface().map(|s| s.size()), Some((800, 600)));
}
