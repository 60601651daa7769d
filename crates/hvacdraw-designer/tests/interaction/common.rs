use hvacdraw_designer::{
    ActionController, DocumentConfig, ObjectTable, Point, Rect, Shape, ShapeId, ShapeStore,
};

pub fn store_with(shapes: Vec<Shape>) -> ShapeStore {
    let mut store = ShapeStore::new();
    for shape in shapes {
        store.insert(shape).expect("insert shape");
    }
    store
}

pub fn rect(id: u64, x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape::rect(ShapeId(id), Rect::new(x, y, w, h)).expect("rect")
}

/// Defaults with every snap switched off.
pub fn unsnapped() -> DocumentConfig {
    let mut config = DocumentConfig::default();
    config.snap.enabled = false;
    config.grid.snap_to_grid = false;
    config
}

pub fn controller() -> ActionController {
    ActionController::new(DocumentConfig::default())
}

pub fn frame_of(store: &ShapeStore, id: u64) -> Rect {
    store.shape(ShapeId(id)).expect("shape").frame()
}

/// Document position of a frame-local point on the stored shape.
pub fn doc_point(store: &ShapeStore, id: u64, local: Point) -> Point {
    store.shape(ShapeId(id)).expect("shape").to_document_point(local)
}
