use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::Context as _;
use eframe::egui::{self, Context, TextureHandle};

use crate::graph::{Graph, NodeId, ViewTransform, Viewport, load_graph};
use crate::image_source::ImageSource;
use crate::source::Location;

mod graph;
mod pointer;
mod preview;
mod render_utils;
mod ui;

use pointer::PointerController;
use preview::PreviewLoader;

#[derive(Clone, Debug)]
pub struct Inputs {
    pub graph: Location,
    pub list: Location,
}

pub struct GraphViewerApp {
    inputs: Inputs,
    image_source: Arc<dyn ImageSource>,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Graph, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    graph: Graph,
    view: Option<ViewTransform>,
    viewport: Viewport,
    pointer: PointerController,
    last_hover: Option<(f64, f64)>,
    preview_loader: PreviewLoader,
    preview: Option<PreviewTexture>,
}

struct PreviewTexture {
    node: NodeId,
    display_name: String,
    size: (usize, usize),
    texture: TextureHandle,
}

impl GraphViewerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        inputs: Inputs,
        image_source: Arc<dyn ImageSource>,
    ) -> Self {
        let state = Self::start_load(inputs.clone());
        Self {
            inputs,
            image_source,
            state,
        }
    }

    fn start_load(inputs: Inputs) -> AppState {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_graph(&inputs.graph, &inputs.list)
                .with_context(|| format!("failed to load graph {}", inputs.graph))
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        AppState::Loading { rx }
    }
}

impl eframe::App for GraphViewerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(graph)) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            graph,
                            Arc::clone(&self.image_source),
                        ))));
                    }
                    Ok(Err(error)) => transition = Some(AppState::Error(error)),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading similarity graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load similarity graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.inputs.clone()));
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx, &self.inputs),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
