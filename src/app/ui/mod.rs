mod panels;
mod preview_panel;
