//! glTF model loading and per-bee visuals.
//!
//! `BeeModelsPlugin` owns the "load the bee and glasses models" entry point.
//! Once both files and their dependencies have loaded it publishes
//! [`BeeTemplates`], which unblocks the swarm spawner, and from then on:
//!
//! - attaches a bee scene to every new [`Bee`] and a glasses scene to every
//!   new [`Glasses`] child;
//! - starts every bee clip looping on the animation player found inside each
//!   bee's scene and keeps it at the bee's [`BeeAnimation`] clip time.
//!
//! A model that fails to load is fatal: the error is logged and the app
//! exits.

use std::collections::HashSet;

use bevy::animation::AnimationPlayer;
use bevy::asset::RecursiveDependencyLoadState;
use bevy::ecs::system::SystemParam;
use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::prelude::*;
use glam::Vec3;
use log::{error, info};
use thiserror::Error;

use crate::bee::{Bee, BeeAnimation, BeeTemplates, Glasses};
use crate::bounds::BoundingBox;
use crate::plugin::SwarmSet;

/// Default asset path of the bee model.
pub const BEE_MODEL_PATH: &str = "models/bee.glb";
/// Default asset path of the glasses model.
pub const GLASSES_MODEL_PATH: &str = "models/glasses.glb";

/// Footprint assumed when the bee model carries no readable mesh positions.
const FALLBACK_FOOTPRINT_SIZE: f32 = 0.02;

/// Errors raised while preparing the models.
#[derive(Event, Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelLoadError {
    /// The configured path cannot address a file under the asset root.
    #[error("invalid model asset path {path:?}")]
    InvalidAssetPath {
        /// Offending asset-server path.
        path: String,
    },
    /// The model or one of its dependencies failed to load.
    #[error("failed to load {path}: {detail}")]
    LoadFailed {
        /// Asset-server path of the model.
        path: String,
        /// Loader diagnostic.
        detail: String,
    },
    /// The model loaded but contains no scene to instantiate.
    #[error("{path} contains no scene")]
    MissingScene {
        /// Asset-server path of the model.
        path: String,
    },
}

/// Runtime configuration for model loading.
#[derive(Resource, Clone, Debug, PartialEq, Eq)]
pub struct BeeModelPaths {
    /// Asset-server path of the bee model.
    pub bee: String,
    /// Asset-server path of the glasses model.
    pub glasses: String,
}

impl Default for BeeModelPaths {
    fn default() -> Self {
        Self {
            bee: BEE_MODEL_PATH.to_owned(),
            glasses: GLASSES_MODEL_PATH.to_owned(),
        }
    }
}

/// Loaded scenes and animation graph shared by every bee.
#[derive(Resource, Debug, Clone)]
pub struct BeeVisuals {
    /// Scene instantiated under every bee.
    pub bee_scene: Handle<Scene>,
    /// Scene instantiated under every glasses child.
    pub glasses_scene: Handle<Scene>,
    /// Graph holding one node per bee clip.
    pub graph: Handle<AnimationGraph>,
    /// Graph nodes paired with the clips they play.
    pub clips: Vec<(AnimationNodeIndex, Handle<AnimationClip>)>,
}

/// Links an animation player inside a bee scene to its bee.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeeAnimationTarget(pub Entity);

#[derive(Resource, Debug)]
struct PendingModels {
    bee: Handle<Gltf>,
    glasses: Handle<Gltf>,
    has_finalised: bool,
}

#[derive(SystemParam)]
struct ModelAssets<'w> {
    gltfs: Res<'w, Assets<Gltf>>,
    gltf_nodes: Res<'w, Assets<GltfNode>>,
    gltf_meshes: Res<'w, Assets<GltfMesh>>,
    meshes: Res<'w, Assets<Mesh>>,
    graphs: ResMut<'w, Assets<AnimationGraph>>,
}

fn validate_asset_path(asset_path: &str) -> Result<(), ModelLoadError> {
    if asset_path.is_empty() || asset_path.starts_with('/') || asset_path.contains("..") {
        return Err(ModelLoadError::InvalidAssetPath {
            path: asset_path.to_owned(),
        });
    }

    Ok(())
}

/// Bounds of the model in its scene space.
///
/// Walks the node hierarchy from every root, composing node transforms on
/// the way down, and encloses each primitive's local box once moved into
/// scene space.
fn model_footprint(gltf: &Gltf, assets: &ModelAssets) -> BoundingBox {
    let children: HashSet<AssetId<GltfNode>> = gltf
        .nodes
        .iter()
        .filter_map(|handle| assets.gltf_nodes.get(handle))
        .flat_map(|node| node.children.iter().map(Handle::id))
        .collect();
    let roots = gltf
        .nodes
        .iter()
        .filter(|handle| !children.contains(&handle.id()))
        .filter_map(|handle| assets.gltf_nodes.get(handle));

    hierarchy_footprint(roots, |node| {
        let boxes = node
            .mesh
            .as_ref()
            .and_then(|handle| assets.gltf_meshes.get(handle))
            .into_iter()
            .flat_map(|gltf_mesh| gltf_mesh.primitives.iter())
            .filter_map(|primitive| assets.meshes.get(&primitive.mesh))
            .filter_map(mesh_bounds)
            .collect();
        let children = node
            .children
            .iter()
            .filter_map(|handle| assets.gltf_nodes.get(handle))
            .collect();
        (node.transform, boxes, children)
    })
    .unwrap_or_else(fallback_footprint)
}

/// Encloses every box reachable from `roots` in the roots' parent space.
///
/// `expand` yields a node's local transform, the local boxes it carries and
/// its children.
fn hierarchy_footprint<N: Copy>(
    roots: impl IntoIterator<Item = N>,
    expand: impl Fn(N) -> (Transform, Vec<BoundingBox>, Vec<N>),
) -> Option<BoundingBox> {
    let mut pending: Vec<(N, Transform)> = roots
        .into_iter()
        .map(|root| (root, Transform::IDENTITY))
        .collect();
    let mut footprint: Option<BoundingBox> = None;

    while let Some((node, parent)) = pending.pop() {
        let (local, boxes, children) = expand(node);
        let placed = parent.mul_transform(local);
        for local_box in boxes {
            let moved = local_box.transformed_by(&placed);
            footprint = Some(footprint.map_or(moved, |acc| acc.union(&moved)));
        }
        pending.extend(children.into_iter().map(|child| (child, placed)));
    }

    footprint
}

fn mesh_bounds(mesh: &Mesh) -> Option<BoundingBox> {
    let points = mesh.attribute(Mesh::ATTRIBUTE_POSITION)?.as_float3()?;
    points
        .iter()
        .map(|p| Vec3::from_array(*p))
        .map(|point| BoundingBox::new(point, point))
        .reduce(|acc, point| acc.union(&point))
}

fn fallback_footprint() -> BoundingBox {
    BoundingBox::from_center_and_size(Vec3::ZERO, Vec3::splat(FALLBACK_FOOTPRINT_SIZE))
}

fn first_scene(gltf: &Gltf, path: &str) -> Result<Handle<Scene>, ModelLoadError> {
    gltf.default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
        .ok_or_else(|| ModelLoadError::MissingScene {
            path: path.to_owned(),
        })
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
fn load_models(mut commands: Commands, asset_server: Res<AssetServer>, paths: Res<BeeModelPaths>) {
    for path in [&paths.bee, &paths.glasses] {
        if let Err(err) = validate_asset_path(path) {
            commands.trigger(err);
            return;
        }
    }

    commands.insert_resource(PendingModels {
        bee: asset_server.load(paths.bee.clone()),
        glasses: asset_server.load(paths.glasses.clone()),
        has_finalised: false,
    });
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
fn monitor_model_load_state(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    paths: Res<BeeModelPaths>,
    mut pending: ResMut<PendingModels>,
    mut assets: ModelAssets,
) {
    if pending.has_finalised {
        return;
    }

    let mut all_loaded = true;
    let models = [(pending.bee.id(), &paths.bee), (pending.glasses.id(), &paths.glasses)];
    for (id, path) in models {
        match asset_server.recursive_dependency_load_state(id) {
            RecursiveDependencyLoadState::Loaded => {}
            RecursiveDependencyLoadState::Failed(error) => {
                commands.trigger(ModelLoadError::LoadFailed {
                    path: path.clone(),
                    detail: error.to_string(),
                });
                pending.has_finalised = true;
                return;
            }
            RecursiveDependencyLoadState::NotLoaded | RecursiveDependencyLoadState::Loading => {
                all_loaded = false;
            }
        }
    }
    if !all_loaded {
        return;
    }

    pending.has_finalised = true;
    match build_visuals(&pending, &paths, &mut assets) {
        Ok((visuals, templates)) => {
            info!(
                "models ready: {} bee clip(s), footprint {:?}",
                visuals.clips.len(),
                templates.footprint.size()
            );
            commands.insert_resource(visuals);
            commands.insert_resource(templates);
        }
        Err(err) => commands.trigger(err),
    }
}

fn build_visuals(
    pending: &PendingModels,
    paths: &BeeModelPaths,
    assets: &mut ModelAssets,
) -> Result<(BeeVisuals, BeeTemplates), ModelLoadError> {
    let missing = |path: &str| ModelLoadError::LoadFailed {
        path: path.to_owned(),
        detail: "asset vanished after loading".to_owned(),
    };
    let bee = assets.gltfs.get(&pending.bee).ok_or_else(|| missing(&paths.bee))?;
    let glasses = assets
        .gltfs
        .get(&pending.glasses)
        .ok_or_else(|| missing(&paths.glasses))?;

    let bee_scene = first_scene(bee, &paths.bee)?;
    let glasses_scene = first_scene(glasses, &paths.glasses)?;
    let footprint = model_footprint(bee, assets);

    let (graph, nodes) = AnimationGraph::from_clips(bee.animations.iter().cloned());
    let clips = nodes.into_iter().zip(bee.animations.iter().cloned()).collect();
    let graph = assets.graphs.add(graph);

    Ok((
        BeeVisuals {
            bee_scene,
            glasses_scene,
            graph,
            clips,
        },
        BeeTemplates::new(footprint),
    ))
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
fn attach_scenes(
    mut commands: Commands,
    visuals: Res<BeeVisuals>,
    bees: Query<Entity, Added<Bee>>,
    glasses: Query<Entity, Added<Glasses>>,
) {
    for entity in &bees {
        commands
            .entity(entity)
            .insert(SceneRoot(visuals.bee_scene.clone()));
    }
    for entity in &glasses {
        commands
            .entity(entity)
            .insert(SceneRoot(visuals.glasses_scene.clone()));
    }
}

/// Finds the bee owning a scene entity, skipping anything under the glasses.
fn owning_bee(
    entity: Entity,
    parents: &Query<&ChildOf>,
    bees: &Query<(), With<Bee>>,
    glasses: &Query<(), With<Glasses>>,
) -> Option<Entity> {
    for ancestor in parents.iter_ancestors(entity) {
        if glasses.contains(ancestor) {
            return None;
        }
        if bees.contains(ancestor) {
            return Some(ancestor);
        }
    }
    None
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
fn start_bee_animations(
    mut commands: Commands,
    visuals: Res<BeeVisuals>,
    mut players: Query<(Entity, &mut AnimationPlayer), Added<AnimationPlayer>>,
    parents: Query<&ChildOf>,
    bees: Query<(), With<Bee>>,
    glasses: Query<(), With<Glasses>>,
) {
    for (entity, mut player) in &mut players {
        let Some(bee) = owning_bee(entity, &parents, &bees, &glasses) else {
            continue;
        };
        for (node, _) in &visuals.clips {
            // Paused: playback position is driven from `BeeAnimation`.
            player.play(*node).repeat().pause();
        }
        commands.entity(entity).insert((
            AnimationGraphHandle(visuals.graph.clone()),
            BeeAnimationTarget(bee),
        ));
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
fn sync_bee_animations(
    visuals: Res<BeeVisuals>,
    clips: Res<Assets<AnimationClip>>,
    animations: Query<&BeeAnimation>,
    mut players: Query<(&BeeAnimationTarget, &mut AnimationPlayer)>,
) {
    for (target, mut player) in &mut players {
        let Ok(animation) = animations.get(target.0) else {
            continue;
        };
        for (node, handle) in &visuals.clips {
            let duration = clips.get(handle).map_or(0.0, AnimationClip::duration);
            if let Some(active) = player.animation_mut(*node) {
                active.seek_to(animation.clip_time(duration));
            }
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn log_model_error(event: On<ModelLoadError>, mut exit: MessageWriter<AppExit>) {
    error!("model error: {}", event.event());
    exit.write(AppExit::error());
}

/// Bevy plugin loading the bee and glasses models and dressing bees with them.
#[derive(Debug)]
pub struct BeeModelsPlugin;

impl Plugin for BeeModelsPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_model_error);
        app.init_resource::<BeeModelPaths>();
        app.add_systems(Startup, load_models);
        app.add_systems(
            Update,
            monitor_model_load_state.run_if(resource_exists::<PendingModels>),
        );
        app.add_systems(
            Update,
            (attach_scenes, start_bee_animations, sync_bee_animations)
                .chain()
                .after(SwarmSet::Flight)
                .run_if(resource_exists::<BeeVisuals>),
        );
    }
}
