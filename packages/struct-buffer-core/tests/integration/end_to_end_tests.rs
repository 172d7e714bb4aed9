//! End-to-end scenarios through the public API.

use ntest::timeout;

use struct_buffer_core::types::{float32, mat3f, uint32, vec3f, vec4f};
use struct_buffer_core::{array_of, struct_of, LayoutError, Scalar, Schema, SharedBuffer};

fn f32_at(bytes: &[u8], offset: usize) -> f32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[offset..offset + 4]);
    f32::from_le_bytes(raw)
}

/// Particle system record: header, nested transform, array of emitters.
#[timeout(5000)]
#[test]
fn test_particle_system_round_trip() -> anyhow::Result<()> {
    let transform = struct_of(
        Schema::named("Transform")
            .field("rotation", mat3f())
            .field("position", vec3f()),
    )?;
    let emitter = struct_of(
        Schema::named("Emitter")
            .field("rate", float32())
            .field("color", vec4f()),
    )?;
    let system = struct_of(
        Schema::named("System")
            .field("id", uint32())
            .field("transform", &transform)
            .field("emitters", array_of(&emitter, 4)?),
    )?;

    assert_eq!(transform.size(), 48);
    assert_eq!(emitter.size(), 20);
    assert_eq!(system.size(), 4 + 48 + 80);

    let view = system.create();
    view.set("id", 42u32)?;
    view.struct_field("transform")?
        .set_vector("position", &[1.0f32, 2.0, 3.0])?;
    let emitters = view.array("emitters")?;
    for (i, emitter) in emitters.iter().enumerate() {
        emitter.set("rate", i as f32 * 10.0)?;
    }
    emitters[3].set_vector("color", &[0.1f32, 0.2, 0.3, 1.0])?;

    let bytes = view.buffer().to_vec();
    assert_eq!(&bytes[0..4], &42u32.to_le_bytes());
    // position follows the 36-byte rotation matrix inside the transform at 4
    assert_eq!(f32_at(&bytes, 40), 1.0);
    assert_eq!(f32_at(&bytes, 48), 3.0);
    // emitter 3 starts at 52 + 3 * 20
    assert_eq!(f32_at(&bytes, 112), 30.0);
    assert_eq!(f32_at(&bytes, 128), 1.0);

    // Rebinding the same bytes reproduces every value
    let copy = SharedBuffer::from_bytes(bytes);
    let reread = system.create_at(&copy, 0)?;
    assert_eq!(reread.to_json(), view.to_json());
    Ok(())
}

#[timeout(5000)]
#[test]
fn test_records_packed_back_to_back() -> anyhow::Result<()> {
    let record = struct_of(Schema::new().field("key", uint32()).field("value", float32()))?;
    let buffer = SharedBuffer::new(record.size() * 4);

    let views = (0..4)
        .map(|i| record.create_at(&buffer, i * record.size()))
        .collect::<Result<Vec<_>, _>>()?;
    for (i, view) in views.iter().enumerate() {
        view.set("key", i as u32)?;
        view.set("value", i as f32 / 2.0)?;
    }

    let table = array_of(&record, 4)?.create_at(&buffer, 0)?;
    for (i, element) in table.iter().enumerate() {
        assert_eq!(element.get("key")?, Scalar::U32(i as u32));
        assert_eq!(element.get_f64("value")?, i as f64 / 2.0);
    }
    Ok(())
}

#[timeout(5000)]
#[test]
fn test_undersized_buffer_fails_fast() -> anyhow::Result<()> {
    let item = struct_of(Schema::new().field("color", vec3f()))?;
    let items = array_of(&item, 3)?;
    let buffer = SharedBuffer::new(35);

    assert_eq!(
        items.create_at(&buffer, 0).unwrap_err(),
        LayoutError::BufferTooSmall {
            buffer_len: 35,
            base_offset: 0,
            required: 36
        }
    );
    assert!(item.create_at(&buffer, 23).is_ok());
    assert!(item.create_at(&buffer, 24).is_err());
    Ok(())
}

#[timeout(5000)]
#[test]
fn test_descriptor_shared_across_threads() -> anyhow::Result<()> {
    let item = struct_of(Schema::new().field("color", vec3f()).field("id", uint32()))?;

    let handles: Vec<_> = (0..4u32)
        .map(|n| {
            let item = item.clone();
            std::thread::spawn(move || -> Result<Vec<u8>, LayoutError> {
                let view = item.create();
                view.set("id", n)?;
                view.to_bytes()
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let bytes = handle.join().expect("worker panicked")?;
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[12..16], &(n as u32).to_le_bytes());
    }
    Ok(())
}
