//! Transient notification toasts for chain and store activity.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

const NOTICE_TTL_SECS: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    pub ttl: f32,
}

/// FIFO queue of live toasts; each expires after a fixed TTL.
#[derive(Resource, Default)]
pub struct Notifications {
    notices: Vec<Notice>,
}

impl Notifications {
    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text.into(), NoticeLevel::Info);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text.into(), NoticeLevel::Error);
    }

    fn push(&mut self, text: String, level: NoticeLevel) {
        self.notices.push(Notice {
            text,
            level,
            ttl: NOTICE_TTL_SECS,
        });
    }

    pub fn tick(&mut self, dt: f32) {
        for notice in &mut self.notices {
            notice.ttl -= dt;
        }
        self.notices.retain(|n| n.ttl > 0.0);
    }

    pub fn live(&self) -> &[Notice] {
        &self.notices
    }
}

pub fn notifications_plugin(app: &mut App) {
    app.init_resource::<Notifications>()
        .add_systems(Update, (tick_notifications, notification_overlay_system));
}

fn tick_notifications(time: Res<Time>, mut notices: ResMut<Notifications>) {
    notices.tick(time.delta_secs());
}

fn notification_overlay_system(mut contexts: EguiContexts, notices: Res<Notifications>) {
    if notices.live().is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("notifications"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            for notice in notices.live() {
                let color = match notice.level {
                    NoticeLevel::Info => egui::Color32::from_rgb(100, 220, 180),
                    NoticeLevel::Error => egui::Color32::from_rgb(240, 120, 120),
                };
                egui::Frame::default()
                    .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
                    .inner_margin(egui::Margin::same(8))
                    .corner_radius(egui::CornerRadius::same(4))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&notice.text).color(color));
                    });
                ui.add_space(4.0);
            }
        });
}
