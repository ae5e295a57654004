extern crate trellis;
#[macro_use]
extern crate approx;

use trellis::prelude::*;

fn forward(scene: &SceneGraph, ent: Entity) -> Vector3<f32> {
    scene.rotation(ent, Space::World).unwrap() * Vector3::unit_z()
}

#[test]
fn advance() {
    let mut scene = SceneGraph::new();
    let e1 = scene.create();
    scene.set_position(e1, [1.0, 0.0, 0.0], Space::Local).unwrap();
    scene.set_euler(e1, Deg(0.0), Deg(90.0), Deg(0.0), Space::Local).unwrap();

    scene.advance(e1, [0.0, 0.0, 1.0]).unwrap();
    assert_relative_eq!(
        scene.position(e1, Space::Local).unwrap(),
        Vector3::new(2.0, 0.0, 0.0),
        epsilon = 1e-6
    );

    scene.advance(e1, [0.0, 1.0, 0.0]).unwrap();
    assert_relative_eq!(
        scene.position(e1, Space::Local).unwrap(),
        Vector3::new(2.0, 1.0, 0.0),
        epsilon = 1e-6
    );
}

#[test]
fn translate() {
    let mut scene = SceneGraph::new();
    let e1 = scene.create();
    let e2 = scene.create();
    scene.set_parent(e2, e1).unwrap();
    scene.set_euler(e1, Deg(0.0), Deg(90.0), Deg(0.0), Space::Local).unwrap();
    scene.set_scale(e1, [2.0, 2.0, 2.0], Space::Local).unwrap();

    scene.translate(e2, [1.0, 0.0, 0.0], Space::Local).unwrap();
    assert_relative_eq!(
        scene.position(e2, Space::Local).unwrap(),
        Vector3::new(1.0, 0.0, 0.0),
        epsilon = 1e-6
    );
    assert_relative_eq!(
        scene.position(e2, Space::World).unwrap(),
        Vector3::new(0.0, 0.0, -2.0),
        epsilon = 1e-5
    );

    scene.translate(e2, [0.0, 0.0, 2.0], Space::World).unwrap();
    assert_relative_eq!(
        scene.position(e2, Space::World).unwrap(),
        Vector3::new(0.0, 0.0, 0.0),
        epsilon = 1e-5
    );
    assert_relative_eq!(
        scene.position(e2, Space::Local).unwrap(),
        Vector3::new(0.0, 0.0, 0.0),
        epsilon = 1e-5
    );
}

#[test]
fn turn() {
    let mut scene = SceneGraph::new();
    let e1 = scene.create();
    let e2 = scene.create();
    scene.set_parent(e2, e1).unwrap();
    scene.set_euler(e1, Deg(90.0), Deg(0.0), Deg(0.0), Space::Local).unwrap();

    // A local yaw turns about the node's own up axis, which the parent has
    // tilted onto +Z.
    scene.turn(e2, Deg(0.0), Deg(90.0), Deg(0.0), Space::Local).unwrap();
    let v = scene.rotation(e2, Space::World).unwrap() * Vector3::unit_x();
    assert_relative_eq!(v, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-5);

    // A world yaw always turns about the forest's +Y.
    scene.set_euler(e2, Deg(0.0), Deg(0.0), Deg(0.0), Space::World).unwrap();
    scene.turn(e2, Deg(0.0), Deg(90.0), Deg(0.0), Space::World).unwrap();
    assert_relative_eq!(forward(&scene, e2), Vector3::unit_x(), epsilon = 1e-5);

    scene.turn(e2, Deg(0.0), Deg(90.0), Deg(0.0), Space::World).unwrap();
    assert_relative_eq!(forward(&scene, e2), -Vector3::unit_z(), epsilon = 1e-5);
}

#[test]
fn set_euler() {
    let mut scene = SceneGraph::new();
    let e1 = scene.create();
    let e2 = scene.create();
    scene.set_parent(e2, e1).unwrap();
    scene.set_euler(e1, Deg(0.0), Deg(90.0), Deg(0.0), Space::Local).unwrap();

    scene.set_euler(e2, Deg(0.0), Deg(90.0), Deg(0.0), Space::Local).unwrap();
    assert_relative_eq!(forward(&scene, e2), -Vector3::unit_z(), epsilon = 1e-5);

    scene.set_euler(e2, Deg(0.0), Deg(90.0), Deg(0.0), Space::World).unwrap();
    assert_relative_eq!(forward(&scene, e2), Vector3::unit_x(), epsilon = 1e-5);

    let local = scene.rotation(e2, Space::Local).unwrap();
    assert_ulps_eq!(local * Vector3::unit_z(), Vector3::unit_z(), epsilon = 1e-5);
}

#[test]
fn point_at() {
    let mut scene = SceneGraph::new();
    let e1 = scene.create();
    let e2 = scene.create();

    scene.set_position(e1, [0.0, 0.0, -5.0], Space::World).unwrap();
    scene.point_at(e1, e2, Deg(0.0)).unwrap();
    assert_relative_eq!(forward(&scene, e1), Vector3::unit_z(), epsilon = 1e-5);

    scene.set_position(e1, [0.0, 0.0, 5.0], Space::World).unwrap();
    scene.point_at(e1, e2, Deg(0.0)).unwrap();
    assert_relative_eq!(forward(&scene, e1), -Vector3::unit_z(), epsilon = 1e-5);

    scene.set_position(e1, [1.0, 0.0, 1.0], Space::World).unwrap();
    scene.point_at(e1, e2, Deg(0.0)).unwrap();
    let v = Vector3::new(-1.0, 0.0, -1.0).normalize();
    assert_relative_eq!(forward(&scene, e1), v, epsilon = 1e-5);

    scene.set_position(e1, [0.0, 0.0, 0.0], Space::World).unwrap();
    scene.set_position(e2, [0.0, 1.0, 1.0], Space::World).unwrap();
    scene.point_at(e1, e2, Deg(0.0)).unwrap();
    let v = Vector3::new(0.0, 1.0, 1.0).normalize();
    assert_relative_eq!(forward(&scene, e1), v, epsilon = 1e-5);

    // Roll spins the node about its forward axis.
    scene.set_position(e2, [0.0, 0.0, 1.0], Space::World).unwrap();
    scene.point_at(e1, e2, Deg(90.0)).unwrap();
    assert_relative_eq!(forward(&scene, e1), Vector3::unit_z(), epsilon = 1e-5);
    let up = scene.rotation(e1, Space::World).unwrap() * Vector3::unit_y();
    assert_relative_eq!(up, -Vector3::unit_x(), epsilon = 1e-5);
}

#[test]
fn point_at_under_parent() {
    let mut scene = SceneGraph::new();
    let e1 = scene.create();
    let e2 = scene.create();
    let e3 = scene.create();

    scene.set_parent(e2, e1).unwrap();
    scene.set_euler(e1, Deg(30.0), Deg(60.0), Deg(0.0), Space::Local).unwrap();
    scene.set_position(e1, [1.0, 2.0, 3.0], Space::Local).unwrap();
    scene.set_position(e3, [-4.0, 0.0, 2.0], Space::World).unwrap();

    scene.point_at(e2, e3, Deg(0.0)).unwrap();
    let dir = (scene.position(e3, Space::World).unwrap()
        - scene.position(e2, Space::World).unwrap())
    .normalize();
    assert_relative_eq!(forward(&scene, e2), dir, epsilon = 1e-5);
}

#[test]
fn align() {
    let mut scene = SceneGraph::new();
    let e1 = scene.create();

    scene.align(e1, [1.0, 0.0, 0.0], Axis::Z, 1.0).unwrap();
    assert_relative_eq!(forward(&scene, e1), Vector3::unit_x(), epsilon = 1e-5);

    scene.set_euler(e1, Deg(0.0), Deg(0.0), Deg(0.0), Space::World).unwrap();
    scene.align(e1, [2.0, 0.0, 0.0], Axis::Z, 0.5).unwrap();
    let v = Vector3::new(1.0, 0.0, 1.0).normalize();
    assert_relative_eq!(forward(&scene, e1), v, epsilon = 1e-5);

    // Rates out of range are clamped.
    scene.align(e1, [1.0, 0.0, 0.0], Axis::Z, 4.0).unwrap();
    assert_relative_eq!(forward(&scene, e1), Vector3::unit_x(), epsilon = 1e-5);

    scene.set_euler(e1, Deg(0.0), Deg(0.0), Deg(0.0), Space::World).unwrap();
    scene.align(e1, [0.0, 0.0, 1.0], Axis::Y, 1.0).unwrap();
    let up = scene.rotation(e1, Space::World).unwrap() * Vector3::unit_y();
    assert_relative_eq!(up, Vector3::unit_z(), epsilon = 1e-5);

    let before = scene.rotation(e1, Space::World).unwrap();
    scene.align(e1, [0.0, 0.0, 0.0], Axis::X, 1.0).unwrap();
    assert_eq!(scene.rotation(e1, Space::World), Some(before));

    scene.align(e1, [1.0, 0.0, 0.0], Axis::X, 0.0).unwrap();
    assert_ulps_eq!(scene.rotation(e1, Space::World).unwrap(), before, epsilon = 1e-6);
}
