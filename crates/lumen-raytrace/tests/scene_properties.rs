//! End-to-end checks of rendering and picking over built scenes.

use std::f64::consts::{FRAC_PI_4, PI};

use approx::assert_relative_eq;
use lumen_math::{direction, point, Color, Transform, Transformation, Vec4};
use lumen_raytrace::{
    pick, pick_with_camera, render_with, to_rgba8, BackendMode, PhongValues, Ray, RayCamera,
    RayVisitor, RenderOptions,
};
use lumen_scene::{
    AABoxNode, NodeId, NodeKind, PyramidNode, SceneGraph, SphereNode, TextureBoxNode,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn forward_ray() -> Ray {
    Ray::new(point(0.0, 0.0, 5.0), direction(0.0, 0.0, -1.0)).unwrap()
}

fn pick_camera() -> RayCamera {
    RayCamera::new(point(0.0, 0.0, 0.0), 101, 101, FRAC_PI_4).unwrap()
}

/// root -> [translate(-5 z) -> leaves...]
fn scene_with(leaves: &[NodeKind]) -> (SceneGraph, NodeId, Vec<NodeId>) {
    let mut sg = SceneGraph::new();
    let root = sg.create_group(Transformation::identity());
    let group = sg.create_group(Transformation::translation(direction(0.0, 0.0, -5.0)));
    sg.add_child(root, group).unwrap();
    let ids = leaves
        .iter()
        .map(|kind| {
            let id = sg.insert(kind.clone());
            sg.add_child(group, id).unwrap();
            id
        })
        .collect();
    (sg, root, ids)
}

#[test]
fn unit_sphere_through_visitor() {
    let mut sg = SceneGraph::new();
    let root = sg.create_group(Transformation::identity());
    let sphere = sg.insert(SphereNode::default());
    sg.add_child(root, sphere).unwrap();

    let hit = RayVisitor::new().trace(&sg, root, forward_ray()).unwrap();
    assert_relative_eq!(hit.intersection.t, 4.0, epsilon = 1e-10);
    assert_relative_eq!(hit.intersection.point, point(0.0, 0.0, 1.0), epsilon = 1e-10);
    assert_relative_eq!(hit.intersection.normal, direction(0.0, 0.0, 1.0), epsilon = 1e-10);
}

#[test]
fn scaled_box_through_visitor() {
    let mut sg = SceneGraph::new();
    // unit box (-0.5..0.5) scaled by 2 spans -1..1
    let root = sg.create_group(Transformation::scaling(direction(2.0, 2.0, 2.0)).unwrap());
    let cube = sg.insert(AABoxNode::default());
    sg.add_child(root, cube).unwrap();

    let hit = RayVisitor::new().trace(&sg, root, forward_ray()).unwrap();
    assert_relative_eq!(hit.intersection.t, 4.0, epsilon = 1e-10);
    assert_relative_eq!(hit.intersection.point, point(0.0, 0.0, 1.0), epsilon = 1e-10);
}

#[test]
fn miss_writes_background() {
    let (sg, root, _) = scene_with(&[SphereNode::default().into()]);
    let background = Color::new(0.25, 0.5, 0.75);
    // looking away from the scene
    let turn = Transform::rotation(&direction(0.0, 1.0, 0.0), PI).unwrap();
    let camera = RayCamera::new(point(0.0, 0.0, 0.0), 9, 9, FRAC_PI_4)
        .unwrap()
        .with_orientation(turn.matrix);

    let ray = camera.make_ray(4.0, 4.0).unwrap();
    assert!(RayVisitor::new().trace(&sg, root, ray).is_none());

    let options = RenderOptions::default().with_background(background);
    let lights = [point(0.0, 5.0, 0.0)];
    let fb = render_with(&sg, root, &camera, &lights, &PhongValues::default(), &options).unwrap();
    let expected = to_rgba8(&background);
    assert!(fb.as_bytes().chunks(4).all(|px| px == expected));
}

#[test]
fn pick_prefers_strictly_nearer() {
    let mut sg = SceneGraph::new();
    let root = sg.create_group(Transformation::identity());
    let far = sg.create_group(Transformation::translation(direction(0.0, 0.0, -8.0)));
    let near = sg.create_group(Transformation::translation(direction(0.0, 0.0, -5.0)));
    // the farther leaf is visited first
    sg.add_child(root, far).unwrap();
    sg.add_child(root, near).unwrap();
    let far_leaf = sg.insert(SphereNode::default());
    let near_leaf = sg.insert(PyramidNode::default());
    sg.add_child(far, far_leaf).unwrap();
    sg.add_child(near, near_leaf).unwrap();

    let mut rng = StdRng::seed_from_u64(11);
    // aim at the pyramid's lower half
    let picked = pick_with_camera(&mut sg, root, &pick_camera(), 50.0, 45.0, &mut rng).unwrap();
    assert_eq!(picked, Some(near_leaf));
}

#[test]
fn pick_tie_goes_to_first_encountered() {
    let (mut sg, root, ids) = scene_with(&[
        SphereNode::new(Color::new(1.0, 0.0, 0.0)).into(),
        SphereNode::new(Color::new(0.0, 1.0, 0.0)).into(),
    ]);
    let mut rng = StdRng::seed_from_u64(5);
    let picked = pick_with_camera(&mut sg, root, &pick_camera(), 50.0, 50.0, &mut rng).unwrap();
    assert_eq!(picked, Some(ids[0]));
    // the other sphere keeps its colour
    assert_eq!(sg.color(ids[1]).unwrap(), Color::new(0.0, 1.0, 0.0));
}

#[test]
fn pick_is_idempotent() {
    let (mut sg, root, ids) = scene_with(&[
        AABoxNode::default().into(),
        SphereNode::default().into(),
        TextureBoxNode::new("wood").into(),
    ]);
    let mut rng = StdRng::seed_from_u64(99);
    let view = pick_camera();
    let first =
        pick(&mut sg, root, &view, 495.0, 495.0, BackendMode::RayTracing, &mut rng).unwrap();
    let second =
        pick(&mut sg, root, &view, 495.0, 495.0, BackendMode::RayTracing, &mut rng).unwrap();
    assert!(first.is_some());
    assert_eq!(first, second);
    // the sphere reaches out to z = -4, in front of both boxes
    assert_eq!(first, Some(ids[1]));
}

#[test]
fn composed_group_transform_round_trips() {
    let mut sg = SceneGraph::new();
    let root = sg.create_group(Transformation::identity());
    let group = sg.create_group(Transformation::identity());
    sg.add_child(root, group).unwrap();
    sg.compose_translation(group, direction(1.0, -2.0, 3.0)).unwrap();
    sg.compose_rotation(group, direction(1.0, 1.0, 0.0), 35.0).unwrap();
    sg.compose_scale(group, direction(2.0, 0.5, 3.0)).unwrap();

    let world = sg.world_transform(group).unwrap();
    let samples: [Vec4; 3] = [point(0.0, 0.0, 0.0), point(1.0, 2.0, 3.0), point(-4.0, 0.5, 9.0)];
    for p in samples {
        assert_relative_eq!(world.apply_inverse(&world.apply(&p)), p, epsilon = 1e-10);
    }
}

#[test]
fn render_is_repeatable() {
    let (sg, root, _) = scene_with(&[SphereNode::default().into(), PyramidNode::default().into()]);
    let camera = RayCamera::new(point(0.0, 0.0, 0.0), 16, 16, FRAC_PI_4).unwrap();
    let lights = [point(2.0, 2.0, 0.0)];
    let options = RenderOptions::default();
    let a = render_with(&sg, root, &camera, &lights, &PhongValues::default(), &options).unwrap();
    let b = render_with(&sg, root, &camera, &lights, &PhongValues::default(), &options).unwrap();
    assert_eq!(a, b);
}
