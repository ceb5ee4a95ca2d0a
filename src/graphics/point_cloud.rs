use crate::prelude::*;
use bevy::{
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    reflect::TypePath,
    render::{
        mesh::{Indices, MeshVertexBufferLayoutRef, PrimitiveTopology},
        render_asset::RenderAssetUsages,
        render_resource::{
            AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType,
            SpecializedMeshPipelineError,
        },
        view::NoFrustumCulling,
    },
};
use bytemuck::{Pod, Zeroable};
use rayon::prelude::*;

const SHADER_ASSET_PATH: &str = "shaders/point_cloud.wgsl";

/// Quad corners, counter-clockwise in view space.
const CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

pub struct PointCloudPlugin;

impl Plugin for PointCloudPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<PointCloudMaterial>::default())
            .init_resource::<InstalledPointCloud>()
            .add_systems(Update, install_point_cloud);
    }
}

/// The galaxy entity on screen and the assets it owns.
#[derive(Resource, Default)]
struct InstalledPointCloud(Option<PointCloudHandles>);

struct PointCloudHandles {
    entity: Entity,
    mesh: Handle<Mesh>,
    material: Handle<PointCloudMaterial>,
}

/// Swaps the drawable whenever a new galaxy buffer lands.
///
/// The replacement is spawned first, then the previous entity is despawned and
/// its mesh and material are removed from their asset stores.
fn install_point_cloud(
    mut commands: Commands,
    galaxy: Option<Res<GalaxyBuffer>>,
    mut installed: ResMut<InstalledPointCloud>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<PointCloudMaterial>>,
) {
    let Some(galaxy) = galaxy else {
        return;
    };
    if !galaxy.is_changed() {
        return;
    }

    let mesh = meshes.add(build_point_cloud_mesh(&galaxy.particles));
    let material = materials.add(PointCloudMaterial::new(galaxy.params.size));
    let entity = commands
        .spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::IDENTITY,
            NoFrustumCulling,
            Name::new(format!("Galaxy {}", galaxy.generation)),
        ))
        .id();

    let previous = installed.0.replace(PointCloudHandles {
        entity,
        mesh,
        material,
    });
    if let Some(previous) = previous {
        commands.entity(previous.entity).despawn();
        meshes.remove(&previous.mesh);
        materials.remove(&previous.material);
    }
    debug!("Installed point cloud for galaxy {}", galaxy.generation);
}

/// Builds one camera-facing quad per particle.
///
/// All four vertices of a quad carry the particle's position and color; the
/// shader pushes them apart using the corner stored in `UV_0`.
pub fn build_point_cloud_mesh(particles: &ParticleBuffer) -> Mesh {
    let positions: Vec<[f32; 3]> = particles
        .positions
        .par_iter()
        .flat_map_iter(|position| [*position; 4])
        .collect();
    let colors: Vec<[f32; 4]> = particles
        .colors
        .par_iter()
        .flat_map_iter(|&[r, g, b]| [[r, g, b, 1.0]; 4])
        .collect();
    let corners: Vec<[f32; 2]> = (0..particles.len())
        .into_par_iter()
        .flat_map_iter(|_| CORNERS)
        .collect();
    let indices: Vec<u32> = (0..particles.len() as u32)
        .into_par_iter()
        .flat_map_iter(|particle| QUAD_INDICES.map(|index| particle * 4 + index))
        .collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, corners)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
    .with_inserted_indices(Indices::U32(indices))
}

// Duplicated in point_cloud.wgsl, keep both in sync
#[derive(ShaderType, Pod, Zeroable, Clone, Copy, Debug, Default)]
#[repr(C)]
pub struct PointCloudSettings {
    size: f32,
    _padding_a: u32,
    _padding_b: u32,
    _padding_c: u32,
}

/// Additive, vertex-colored sprites without depth writes.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct PointCloudMaterial {
    #[uniform(0)]
    settings: PointCloudSettings,
    alpha_mode: AlphaMode,
}

impl PointCloudMaterial {
    pub fn new(size: f32) -> Self {
        Self {
            settings: PointCloudSettings {
                size,
                _padding_a: 0,
                _padding_b: 0,
                _padding_c: 0,
            },
            alpha_mode: AlphaMode::Add,
        }
    }
}

impl Material for PointCloudMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
            Mesh::ATTRIBUTE_COLOR.at_shader_location(2),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        descriptor.primitive.cull_mode = None;
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}
