use crate::app::App;

mod app;
mod components;
mod supabase;

fn main() {
    yew::Renderer::<App>::new().render();
}
