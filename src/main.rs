use avian3d::prelude::*;
use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow},
};
use climb_system::prelude::*;

const SETTINGS_PATH: &str = "assets/settings.ron";

/// Camera trailing the player at a fixed distance behind the control yaw
#[derive(Component)]
struct FollowCamera {
    distance: f32,
    height: f32,
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Climbing Controller".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ClimbSystemPlugin)
        .add_systems(Startup, (setup, setup_cursor_grab))
        .add_systems(Update, (toggle_cursor_grab, report_climb_state))
        .add_systems(PostUpdate, follow_player.before(TransformSystems::Propagate))
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let settings = Settings::load(SETTINGS_PATH).unwrap_or_else(|err| {
        warn!("{SETTINGS_PATH}: {err}; using default settings");
        Settings::default()
    });
    let config = settings.player;

    let player = spawn_player(&mut commands, settings, Vec3::new(0.0, 1.0, 4.0));
    commands.entity(player).insert((
        Mesh3d(meshes.add(Capsule3d::new(
            config.radius,
            (config.half_height - config.radius) * 2.0,
        ))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.8, 0.55, 0.3),
            ..default()
        })),
    ));

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 3.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        FollowCamera {
            distance: 6.0,
            height: 2.5,
        },
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let ground_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.55, 0.35),
        perceptual_roughness: 0.9,
        ..default()
    });
    let stone = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.43, 0.46),
        perceptual_roughness: 0.85,
        ..default()
    });

    // Ground
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(100.0, 100.0))),
        MeshMaterial3d(ground_mat),
        Transform::from_translation(Vec3::ZERO),
        RigidBody::Static,
        Collider::half_space(Vec3::Y),
        CollisionLayers::new(GameLayer::World, [GameLayer::Player]),
    ));

    // Tall wall ahead: both probe rays hit, so a jump schedules a climb
    spawn_block(
        &mut commands,
        &mut meshes,
        stone.clone(),
        Vec3::new(8.0, 8.0, 1.0),
        Transform::from_xyz(0.0, 4.0, -1.0),
    );

    // Waist-high ledge: the head ray clears it, so a jump vaults on top
    spawn_block(
        &mut commands,
        &mut meshes,
        stone.clone(),
        Vec3::new(3.0, 1.2, 3.0),
        Transform::from_xyz(8.0, 0.6, 3.0),
    );

    // Angled panel meeting the tall wall at a shallow bend
    spawn_block(
        &mut commands,
        &mut meshes,
        stone,
        Vec3::new(6.0, 6.0, 1.0),
        Transform::from_xyz(-6.7, 3.0, 0.0).with_rotation(Quat::from_rotation_y(0.5)),
    );
}

fn spawn_block(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    size: Vec3,
    transform: Transform,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
        MeshMaterial3d(material),
        transform,
        RigidBody::Static,
        Collider::cuboid(size.x, size.y, size.z),
        CollisionLayers::new(GameLayer::World, [GameLayer::Player]),
    ));
}

fn follow_player(
    player_query: Query<(&Transform, &ControlYaw), (With<Player>, Without<FollowCamera>)>,
    mut camera_query: Query<(&mut Transform, &FollowCamera)>,
) {
    let Ok((player, yaw)) = player_query.single() else {
        return;
    };
    let (forward, _) = yaw.axes();

    for (mut transform, follow) in &mut camera_query {
        let eye = player.translation - forward * follow.distance + Vec3::Y * follow.height;
        *transform = Transform::from_translation(eye).looking_at(player.translation, Vec3::Y);
    }
}

/// Shows the climb phase in the window title
fn report_climb_state(
    player_query: Query<&ClimbController, (With<Player>, Changed<ClimbController>)>,
    mut window_query: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(controller) = player_query.single() else {
        return;
    };
    let Ok(mut window) = window_query.single_mut() else {
        return;
    };

    let label = match controller.phase() {
        ClimbPhase::Grounded => "grounded",
        ClimbPhase::JumpPending => "airborne",
        ClimbPhase::ClimbPending { .. } => "reaching for wall",
        ClimbPhase::Climbing { .. } => "climbing",
    };
    window.title = format!("Climbing Controller ({label})");
}

fn setup_cursor_grab(mut cursor_query: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    if let Ok(mut cursor) = cursor_query.single_mut() {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}

fn toggle_cursor_grab(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut cursor_query: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let Ok(mut cursor) = cursor_query.single_mut() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Escape) {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    } else if mouse.just_pressed(MouseButton::Left) && cursor.grab_mode == CursorGrabMode::None {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}
