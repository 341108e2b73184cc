//! Chain behaviour through the public API only.

use framechain::{step_fn, Animated, Chain, ChainFactory, LoopCount, Repetitions, Step, Tick};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct Flags {
    a: u32,
    b: u32,
    c: u32,
}

fn drive<C: 'static>(chain: &mut Chain<C>, ticks: usize, elapsed: f64) {
    for _ in 0..ticks {
        chain.tick(elapsed);
    }
}

#[test]
fn test_then_fires_on_first_tick_only() {
    let mut chain = Chain::new(Flags::default()).then(|f: &mut Flags| f.a += 1);
    chain.tick(0.0);
    chain.tick(0.0);
    chain.tick(0.0);
    assert_eq!(chain.context().borrow().a, 1);
}

#[test]
fn test_wait_then_sequence() {
    let mut chain = Chain::new(Flags::default())
        .wait(5.0)
        .then(|f: &mut Flags| f.a += 1);

    chain.tick(0.0);
    assert_eq!(chain.context().borrow().a, 0);

    chain.tick(5.0);
    chain.tick(0.0);
    assert_eq!(chain.context().borrow().a, 1);
}

#[test]
fn test_during_counts_wait_ticks() {
    let mut chain = Chain::new(Flags::default())
        .wait(2.0)
        .during(|f: &mut Flags| f.a += 1)
        .unwrap()
        .then(|f: &mut Flags| f.b += 1);

    drive(&mut chain, 3, 1.0);
    let flags = chain.context().borrow();
    assert_eq!(flags.a, 2);
    assert_eq!(flags.b, 1);
}

#[test]
fn test_nested_repeat_counts() {
    let mut chain = Chain::new(Flags::default())
        .then(|f: &mut Flags| f.a += 1)
        .repeat(2)
        .then(|f: &mut Flags| f.b += 1)
        .repeat(2);

    drive(&mut chain, 11, 0.0);
    let flags = chain.context().borrow();
    assert_eq!(flags.a, 4);
    assert_eq!(flags.b, 2);
}

#[test]
fn test_every_fires_four_times_in_five_seconds() {
    let mut chain = Chain::new(Flags::default())
        .wait(5.0)
        .every(1.0, |f: &mut Flags| f.a += 1)
        .unwrap();

    drive(&mut chain, 75, 0.1);
    assert_eq!(chain.context().borrow().a, 4);
}

#[test]
fn test_or_until_six_then_two() {
    let mut chain = Chain::new(Flags::default())
        .wait(5.0)
        .or_until(|f: &mut Flags| {
            if f.a > 5 {
                return true;
            }
            f.a += 1;
            false
        })
        .unwrap()
        .then(|f: &mut Flags| f.b += 1)
        .repeat_forever();

    drive(&mut chain, 12, 0.1);
    let flags = chain.context().borrow();
    assert_eq!(flags.a, 6);
    assert_eq!(flags.b, 2);
}

#[test]
fn test_repeat_with_explicit_repetitions() {
    let mut chain = Chain::new(Flags::default())
        .then(|f: &mut Flags| f.c += 1)
        .repeat_with(Repetitions::Times(3));
    drive(&mut chain, 20, 0.0);
    assert_eq!(chain.context().borrow().c, 3);
    assert!(chain.is_finished());
}

#[test]
fn test_repeat_only_covers_steps_before_it() {
    let mut chain = Chain::new(Flags::default())
        .then(|f: &mut Flags| f.a += 1)
        .repeat(3)
        .then(|f: &mut Flags| f.b += 1);

    drive(&mut chain, 20, 0.0);
    let flags = chain.context().borrow();
    assert_eq!(flags.a, 3);
    assert_eq!(flags.b, 1);
}

#[test]
fn test_shared_context_is_visible_to_host() {
    let shared = Rc::new(RefCell::new(Flags::default()));
    let mut chain = Chain::with_shared(Rc::clone(&shared)).then(|f: &mut Flags| f.a = 7);
    chain.tick(0.0);
    assert_eq!(shared.borrow().a, 7);
}

#[test]
fn test_empty_chain_tick_is_noop() {
    let mut chain = Chain::new(Flags::default());
    drive(&mut chain, 5, 1.0);
    assert!(chain.is_finished());
    assert_eq!(chain.len(), 0);
}

struct Countdown {
    left: Cell<u32>,
}

impl Step<Flags> for Countdown {
    fn advance(&self, tick: &mut Tick<'_, Flags>) {
        tick.with_context(|f| f.c += 1);
        let left = self.left.get().saturating_sub(1);
        self.left.set(left);
        if left == 0 {
            tick.complete();
        }
    }

    fn label(&self) -> &str {
        "countdown"
    }
}

#[test]
fn test_custom_step_can_be_wrapped_by_during() {
    let mut factory = ChainFactory::<Flags>::new();
    factory.register_fn("countdown", |_, queue, _| {
        queue.push(Rc::new(Countdown { left: Cell::new(3) }));
        Ok(())
    });
    let mut chain = factory
        .chain(Flags::default())
        .call("countdown", Value::Null)
        .unwrap()
        .during(|f: &mut Flags| f.a += 1)
        .unwrap();

    drive(&mut chain, 5, 0.0);
    let flags = chain.context().borrow();
    assert_eq!(flags.c, 3);
    assert_eq!(flags.a, 3);
    assert!(chain.is_finished());
}

#[test]
fn test_step_fn_steps_join_the_queue() {
    let mut factory = ChainFactory::<Flags>::new();
    factory.register_fn("mark", |_, queue, _| {
        queue.push(step_fn("mark", |tick: &mut Tick<'_, Flags>| {
            tick.with_context(|f| f.b += 1);
            tick.complete();
        }));
        Ok(())
    });
    let mut chain = factory
        .chain(Flags::default())
        .then(|f: &mut Flags| f.a += 1)
        .call("mark", Value::Null)
        .unwrap();

    assert_eq!(chain.queue().labels(), vec!["then", "mark"]);
    drive(&mut chain, 2, 0.0);
    let flags = chain.context().borrow();
    assert_eq!((flags.a, flags.b), (1, 1));
}

struct Sprite {
    current: Option<Rc<Cell<u32>>>,
}

impl Animated for Sprite {
    fn current_animation(&self) -> Option<Rc<dyn LoopCount>> {
        self.current
            .as_ref()
            .map(|cell| Rc::clone(cell) as Rc<dyn LoopCount>)
    }
}

#[test]
fn test_wait_for_current_animation_loops() {
    let loops = Rc::new(Cell::new(0u32));
    let mut chain = Chain::new(Sprite {
        current: Some(Rc::clone(&loops)),
    })
    .wait_for_current_animation_loops(3)
    .unwrap()
    .then(|s: &mut Sprite| s.current = None);

    loops.set(2);
    drive(&mut chain, 3, 0.1);
    assert!(chain.context().borrow().current.is_some());

    loops.set(3);
    drive(&mut chain, 2, 0.1);
    assert!(chain.context().borrow().current.is_none());
}

#[test]
fn test_wait_for_current_animation_without_animation_fails() {
    let err = Chain::new(Sprite { current: None })
        .wait_for_current_animation()
        .unwrap_err();
    assert!(matches!(err, framechain::ChainError::NoCurrentAnimation));
}
