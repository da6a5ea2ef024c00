
use {
    crate::{
        fixed::Fixed,
        ifs::wl_surface::WlSurface,
        object::Object,
        utils::{bindings::Bindings, rc_eq::rc_eq},
    },
    std::{cell::RefCell, rc::Rc},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Layer {
    Surfaces,
    Cursor,
}

/// The hit-test result of [`SurfaceTree::pick_surface`].
#[derive(Clone)]
pub struct FoundSurface {
    pub surface: Rc<WlSurface>,
    pub x: Fixed,
    pub y: Fixed,
}

/// The stacking order of all mapped surfaces, bottom to top.
///
/// The cursor layer is always stacked above regular surfaces.
#[derive(Default)]
pub struct SurfaceTree {
    surfaces: RefCell<Vec<Rc<WlSurface>>>,
    cursors: RefCell<Vec<Rc<WlSurface>>>,
}

impl SurfaceTree {
    fn layer(&self, layer: Layer) -> &RefCell<Vec<Rc<WlSurface>>> {
        match layer {
            Layer::Surfaces => &self.surfaces,
            Layer::Cursor => &self.cursors,
        }
    }

    /// Maps the surface at the top of the layer.
    pub fn map(&self, layer: Layer, surface: &Rc<WlSurface>) {
        self.unmap(surface);
        self.layer(layer).borrow_mut().push(surface.clone());
        surface.set_mapped(true);
    }

    /// Maps the surface directly below `sibling`. Falls back to the top of
    /// the layer if `sibling` is not part of it.
    pub fn map_below(&self, layer: Layer, surface: &Rc<WlSurface>, sibling: &Rc<WlSurface>) {
        self.unmap(surface);
        let mut list = self.layer(layer).borrow_mut();
        let pos = list.iter().position(|s| rc_eq(s, sibling));
        match pos {
            Some(pos) => list.insert(pos, surface.clone()),
            None => list.push(surface.clone()),
        }
        surface.set_mapped(true);
    }

    pub fn unmap(&self, surface: &WlSurface) {
        for layer in [&self.surfaces, &self.cursors] {
            layer.borrow_mut().retain(|s| !std::ptr::eq(&**s, surface));
        }
        surface.set_mapped(false);
    }

    pub fn raise(&self, surface: &Rc<WlSurface>) {
        let mut list = self.surfaces.borrow_mut();
        if let Some(pos) = list.iter().position(|s| rc_eq(s, surface)) {
            let s = list.remove(pos);
            list.push(s);
        }
    }

    pub fn stacking_order(&self) -> Vec<Rc<WlSurface>> {
        let mut res = self.surfaces.borrow().clone();
        res.extend(self.cursors.borrow().iter().cloned());
        res
    }

    /// Finds the topmost mapped surface whose input region contains the
    /// global point and returns the point in its local coordinates.
    pub fn pick_surface(&self, x: Fixed, y: Fixed) -> Option<FoundSurface> {
        let order = self.stacking_order();
        for surface in order.iter().rev() {
            if !surface.is_mapped() {
                continue;
            }
            let (sx, sy) = surface.from_global(x, y);
            if surface.accepts_input(sx.round_down(), sy.round_down()) {
                return Some(FoundSurface {
                    surface: surface.clone(),
                    x: sx,
                    y: sy,
                });
            }
        }
        None
    }
}

/// The binding through which the owner of `surface` listens on a device.
pub fn find_binding_for_surface<P: Object>(
    bindings: &Bindings<P>,
    surface: &WlSurface,
) -> Option<Rc<P>> {
    bindings.find(surface.client.id)
}
