#![forbid(unsafe_code)]

//! The prelude is enough to wire a controller to a surface.

use std::rc::Rc;

use dragon::prelude::*;
use dragon::{MemoryDocument, MemorySurface, Rect, Viewport};

#[test]
fn prelude_wires_a_drag() -> Result<()> {
    let doc = MemoryDocument::new(ComponentMeta::new("Page").container());
    let root = doc.root_id();
    let doc = Rc::new(doc);
    let surface = MemorySurface::new(Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0)));
    surface.place(root, None, Rect::new(0.0, 0.0, 100.0, 100.0));

    let mut dragon = Dragon::new(doc.clone(), DragonConfig::default())?;
    dragon.add_sensor(Box::new(SurfaceSensor::new(SurfaceId(1), surface, doc)))?;
    let payload = DragPayload::new_data([dragon::NodeDescriptor::new("Button")]);
    assert!(dragon.boost(payload, &PointerEvent::down(90.0, 90.0), None));
    dragon.handle_pointer(&PointerEvent::moved(50.0, 50.0));
    let location = dragon.location().cloned();
    assert_eq!(location.map(|l| (l.target, l.index())), Some((root, 0)));
    Ok(())
}

#[test]
fn duplicate_sensor_surfaces_as_error() {
    let doc: Rc<dyn Document> = Rc::new(MemoryDocument::new(ComponentMeta::new("Page")));
    let mut dragon = Dragon::new(Rc::clone(&doc), DragonConfig::default()).unwrap();
    let sensor = |id| {
        let surface = MemorySurface::new(Viewport::new(Rect::default()));
        Box::new(SurfaceSensor::new(SurfaceId(id), surface, Rc::clone(&doc)))
    };
    dragon.add_sensor(sensor(4)).unwrap();
    let err: Error = dragon.add_sensor(sensor(4)).unwrap_err();
    assert_eq!(err.to_string(), "sensor surface#4 is already registered");
}
