//! Pointer records shared with the fluid renderer
//!
//! The renderer owns these and reads them once per simulation tick; the
//! tracker mutates them in place from the results callback. Both run on the
//! browser's single thread, so the set is shared as `Rc<RefCell<_>>`. Each
//! hand writes only its own slot.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::hand::Hand;

/// RGB splat colour, components in 0-1
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl PointerColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Fixed colour per hand: blue for left, red for right
    pub fn for_hand(hand: Hand) -> Self {
        match hand {
            Hand::Left => Self::new(0.0, 0.5, 1.0),
            Hand::Right => Self::new(1.0, 0.0, 0.25),
        }
    }
}

/// One pointer as the fluid simulation sees it
///
/// Deserializes from a partial object so a renderer can hand over its own
/// pointer defaults; missing fields take their `Default`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pointer {
    pub texcoord_x: f32,
    pub texcoord_y: f32,
    pub prev_texcoord_x: f32,
    pub prev_texcoord_y: f32,
    pub delta_x: f32,
    pub delta_y: f32,
    /// Hand present in the most recent batch
    pub down: bool,
    /// Set by the tracker on significant motion, cleared by the renderer
    pub moved: bool,
    pub color: PointerColor,
}

impl Pointer {
    /// Move to a new position, keeping the old one as `prev_texcoord`
    pub fn move_to(&mut self, pos: (f32, f32), delta: (f32, f32)) {
        self.prev_texcoord_x = self.texcoord_x;
        self.prev_texcoord_y = self.texcoord_y;
        self.texcoord_x = pos.0;
        self.texcoord_y = pos.1;
        self.delta_x = delta.0;
        self.delta_y = delta.1;
    }
}

/// Constructor for fresh pointer records
pub type PointerFactory = Box<dyn Fn() -> Pointer>;

/// Fixed-capacity pointer storage, one lazily created slot per hand
pub struct PointerSet {
    slots: [Option<Pointer>; Hand::COUNT],
    factory: PointerFactory,
}

pub type SharedPointers = Rc<RefCell<PointerSet>>;

impl PointerSet {
    pub fn new() -> Self {
        Self::with_factory(Pointer::default)
    }

    pub fn with_factory(factory: impl Fn() -> Pointer + 'static) -> Self {
        Self {
            slots: Default::default(),
            factory: Box::new(factory),
        }
    }

    /// New pointers are built from `template`; existing ones are untouched
    pub fn set_template(&mut self, template: Pointer) {
        self.set_factory(move || template.clone());
    }

    pub fn set_factory(&mut self, factory: impl Fn() -> Pointer + 'static) {
        self.factory = Box::new(factory);
    }

    pub fn shared(self) -> SharedPointers {
        Rc::new(RefCell::new(self))
    }

    pub fn get(&self, hand: Hand) -> Option<&Pointer> {
        self.slots[hand.index()].as_ref()
    }

    pub fn get_mut(&mut self, hand: Hand) -> Option<&mut Pointer> {
        self.slots[hand.index()].as_mut()
    }

    /// Pointer for `hand`, created with the factory on first use
    pub fn get_or_create(&mut self, hand: Hand) -> &mut Pointer {
        let factory = &self.factory;
        self.slots[hand.index()].get_or_insert_with(|| {
            log::debug!("Creating pointer for {} hand", hand);
            factory()
        })
    }

    /// Mark `hand` as up if its pointer exists
    pub fn release(&mut self, hand: Hand) {
        if let Some(pointer) = self.get_mut(hand) {
            pointer.down = false;
        }
    }

    pub fn release_all(&mut self) {
        for hand in Hand::ALL {
            self.release(hand);
        }
    }

    /// Renderer side of the `moved` contract
    pub fn clear_moved(&mut self, hand: Hand) {
        if let Some(pointer) = self.get_mut(hand) {
            pointer.moved = false;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Hand, &Pointer)> {
        Hand::ALL
            .into_iter()
            .filter_map(move |hand| self.get(hand).map(|p| (hand, p)))
    }
}

impl Default for PointerSet {
    fn default() -> Self {
        Self::new()
    }
}
