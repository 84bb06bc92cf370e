//! View rendering for the feedback page.
//!
//! The page is a hero header, a stats dashboard, the three-step feedback
//! form, and the filtered review list. Star ratings always render the
//! clamped value, so a stored out-of-range rating shows at most five filled
//! stars. While a submission is in flight the whole form sits inside a
//! disabled `<fieldset>`, which makes every input inert at once.

use web_sys::{Event, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, InputEvent};
use yew::html::Scope;
use yew::prelude::*;

use common::feed::{RatingFilter, RoleFilter};
use common::model::review::{Review, Role};
use common::stats::Distribution;
use common::submit::{CategoryField, FORM_STEPS};

use super::helpers::{format_date, percent_of};
use super::messages::Msg;
use super::state::FeedbackPage;

const CONFETTI_PIECES: usize = 28;

/// Main view function for the feedback page.
pub fn view(component: &FeedbackPage, ctx: &Context<FeedbackPage>) -> Html {
    let link = ctx.link();
    html! {
        <div class="page">
            { build_hero() }
            {
                if component.is_connected() {
                    html! {}
                } else {
                    build_offline_banner()
                }
            }
            <main class="content">
                <section class="panel panel-stats">
                    { build_dashboard(&component.distribution) }
                </section>
                <section class="panel panel-form">
                    { build_form(component, link) }
                </section>
            </main>
            { build_review_list(component, link) }
            {
                if component.celebrating {
                    build_confetti()
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_hero() -> Html {
    html! {
        <header class="hero">
            <h1 class="hero-title">{"BrainFuel AI"}</h1>
            <p class="hero-tagline">{"Smarter studying, powered by AI."}</p>
            <p class="hero-sub">{"Tell us how it went — every review shows up live below."}</p>
        </header>
    }
}

/// Persistent notice for builds without service configuration. The page
/// stays interactive, but nothing is loaded or submitted.
fn build_offline_banner() -> Html {
    html! {
        <div class="banner banner-offline">
            {"Not connected to the feedback service — reviews cannot be loaded or submitted."}
        </div>
    }
}

/// Dashboard: average, response count, per-star bars, recommend share.
fn build_dashboard(dist: &Distribution) -> Html {
    let bars = (1..=5u8)
        .rev()
        .map(|star| {
            let count = dist.stars(star);
            let width = percent_of(count, dist.total);
            html! {
                <div class="histogram-row" key={star.to_string()}>
                    <span class="histogram-label">{ format!("{star} ★") }</span>
                    <div class="histogram-track">
                        <div class="histogram-fill" style={format!("width:{width}%")} />
                    </div>
                    <span class="histogram-count">{ count }</span>
                </div>
            }
        })
        .collect::<Html>();

    html! {
        <div class="dashboard">
            <h2>{"What students and faculty say"}</h2>
            <div class="dashboard-summary">
                <div class="summary-block">
                    <span class="summary-number">{ format!("{:.1}", dist.average) }</span>
                    <span class="summary-caption">{"average rating"}</span>
                </div>
                <div class="summary-block">
                    <span class="summary-number">{ dist.total }</span>
                    <span class="summary-caption">{"responses"}</span>
                </div>
                <div class="summary-block">
                    <span class="summary-number">{ format!("{}%", dist.recommend_percent()) }</span>
                    <span class="summary-caption">{"would recommend"}</span>
                </div>
            </div>
            { bars }
        </div>
    }
}

/// The three-step form. Inert while a submission is in flight.
fn build_form(component: &FeedbackPage, link: &Scope<FeedbackPage>) -> Html {
    let step_body = match component.step {
        0 => build_step_basics(component, link),
        1 => build_step_experience(component, link),
        _ => build_step_categories(component, link),
    };

    html! {
        <form class="feedback-form" onsubmit={link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        })}>
            <h2>{"Share your feedback"}</h2>
            <p class="step-indicator">{ format!("Step {} of {}", component.step + 1, FORM_STEPS) }</p>
            <fieldset disabled={component.submitting}>
                { step_body }
                {
                    component.form_error.as_ref().map(|err| html! {
                        <p class="form-error">{ err.to_string() }</p>
                    })
                }
                {
                    component.submit_error.as_ref().map(|err| html! {
                        <p class="submit-error">{ err.clone() }</p>
                    })
                }
                { build_form_nav(component, link) }
            </fieldset>
        </form>
    }
}

fn build_step_basics(component: &FeedbackPage, link: &Scope<FeedbackPage>) -> Html {
    let draft = &component.draft;
    html! {
        <>
            <label class="field">
                <span>{"Your name"}</span>
                <input
                    value={draft.name.clone()}
                    placeholder="e.g. Asha"
                    oninput={link.callback(|e: InputEvent| {
                        Msg::NameInput(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            </label>
            <div class="field">
                <span>{"You are a…"}</span>
                <div class="role-toggle">
                    { role_button(draft.role, Role::Student, link) }
                    { role_button(draft.role, Role::Faculty, link) }
                </div>
            </div>
            <div class="field">
                <span>{"Overall rating"}</span>
                <div class="star-picker">
                    { build_star_picker(draft.rating, link.callback(Msg::RatingSelected)) }
                </div>
            </div>
        </>
    }
}

fn build_step_experience(component: &FeedbackPage, link: &Scope<FeedbackPage>) -> Html {
    let draft = &component.draft;
    html! {
        <>
            <label class="field">
                <span>{"How was your experience?"}</span>
                <textarea
                    value={draft.experience.clone()}
                    placeholder="What worked, what didn't…"
                    oninput={link.callback(|e: InputEvent| {
                        Msg::ExperienceInput(e.target_unchecked_into::<HtmlTextAreaElement>().value())
                    })}
                />
            </label>
            <div class="field">
                <span>{"How reliable did it feel?"}</span>
                <div class="star-picker">
                    { build_star_picker(draft.reliability_rating, link.callback(Msg::ReliabilitySelected)) }
                </div>
            </div>
            <div class="field">
                <span>{"Would you recommend it?"}</span>
                <div class="role-toggle">
                    { recommend_button(draft.would_recommend, true, "Yes", link) }
                    { recommend_button(draft.would_recommend, false, "No", link) }
                </div>
            </div>
        </>
    }
}

/// The optional category textareas; none of them block submission.
fn build_step_categories(component: &FeedbackPage, link: &Scope<FeedbackPage>) -> Html {
    html! {
        <>
            <p class="step-hint">{"All of these are optional — skip what doesn't apply."}</p>
            {
                for CategoryField::ALL.iter().map(|&field| html! {
                    <label class="field">
                        <span>{ field.label() }</span>
                        <textarea
                            value={component.draft.category(field).to_string()}
                            oninput={link.callback(move |e: InputEvent| {
                                Msg::CategoryInput(
                                    field,
                                    e.target_unchecked_into::<HtmlTextAreaElement>().value(),
                                )
                            })}
                        />
                    </label>
                })
            }
        </>
    }
}

fn build_form_nav(component: &FeedbackPage, link: &Scope<FeedbackPage>) -> Html {
    let back = if component.step > 0 {
        html! {
            <button type="button" class="btn-secondary" onclick={link.callback(|_| Msg::PrevStep)}>
                {"Back"}
            </button>
        }
    } else {
        html! {}
    };

    let forward = if component.step + 1 < FORM_STEPS {
        html! {
            <button type="button" class="btn-primary" onclick={link.callback(|_| Msg::NextStep)}>
                {"Next"}
            </button>
        }
    } else if component.is_connected() {
        html! {
            <button type="submit" class="btn-primary">
                { if component.submitting { "Sending…" } else { "Send feedback" } }
            </button>
        }
    } else {
        // Degraded mode: no remote insert is possible, so no submit button.
        html! { <span class="form-offline-note">{"Submitting is unavailable while offline."}</span> }
    };

    html! {
        <div class="form-nav">
            { back }
            { forward }
        </div>
    }
}

fn role_button(current: Option<Role>, role: Role, link: &Scope<FeedbackPage>) -> Html {
    let active = current == Some(role);
    html! {
        <button
            type="button"
            class={classes!("toggle-btn", active.then_some("active"))}
            onclick={link.callback(move |_| Msg::RoleSelected(role))}
        >
            { role.label() }
        </button>
    }
}

fn recommend_button(
    current: Option<bool>,
    answer: bool,
    label: &'static str,
    link: &Scope<FeedbackPage>,
) -> Html {
    let active = current == Some(answer);
    html! {
        <button
            type="button"
            class={classes!("toggle-btn", active.then_some("active"))}
            onclick={link.callback(move |_| Msg::RecommendSelected(answer))}
        >
            { label }
        </button>
    }
}

/// Clickable five-star row used by both rating questions.
fn build_star_picker(current: u8, onpick: Callback<u8>) -> Html {
    (1..=5u8)
        .map(|star| {
            let onpick = onpick.clone();
            let filled = star <= current;
            html! {
                <button
                    type="button"
                    key={star.to_string()}
                    class={classes!("star-btn", filled.then_some("filled"))}
                    onclick={Callback::from(move |_| onpick.emit(star))}
                >
                    { if filled { "★" } else { "☆" } }
                </button>
            }
        })
        .collect::<Html>()
}

/// Read-only star row; always shows the clamped rating.
fn build_stars(clamped: u8) -> Html {
    (1..=5u8)
        .map(|star| {
            html! {
                <span class="star">{ if star <= clamped { "★" } else { "☆" } }</span>
            }
        })
        .collect::<Html>()
}

/// The scrollable list: filter controls, "showing N of M", the cards, and
/// the load-more affordance.
fn build_review_list(component: &FeedbackPage, link: &Scope<FeedbackPage>) -> Html {
    let (visible, total) = component.display.select(&component.feed);
    let shown = visible.len();

    let body = if component.loading && component.feed.is_empty() {
        html! { <p class="list-note">{"Loading reviews…"}</p> }
    } else if component.feed.is_empty() {
        html! {
            <div class="empty-state">
                <p>{"No responses yet — be the first to share your experience."}</p>
            </div>
        }
    } else if total == 0 {
        html! { <p class="list-note">{"No reviews match these filters."}</p> }
    } else {
        html! {
            <>
                <p class="list-note">{ format!("Showing {shown} of {total}") }</p>
                <div class="review-grid">
                    { for visible.iter().map(|review| review_card(review)) }
                </div>
                {
                    if total > shown {
                        html! {
                            <button class="btn-secondary load-more" onclick={link.callback(|_| Msg::RevealMore)}>
                                {"Load more"}
                            </button>
                        }
                    } else {
                        html! {}
                    }
                }
            </>
        }
    };

    html! {
        <section class="reviews">
            <div class="reviews-head">
                <h2>{"Recent reviews"}</h2>
                { build_filter_controls(component, link) }
            </div>
            {
                component.load_error.as_ref().map(|err| html! {
                    <div class="banner banner-error">
                        { format!("Couldn't load all reviews: {err}") }
                    </div>
                })
            }
            { body }
        </section>
    }
}

fn build_filter_controls(component: &FeedbackPage, link: &Scope<FeedbackPage>) -> Html {
    let role = component.display.role();
    let rating = component.display.rating();

    html! {
        <div class="filters">
            <select onchange={link.callback(|e: Event| {
                let value = e.target_unchecked_into::<HtmlSelectElement>().value();
                Msg::SetRoleFilter(match value.as_str() {
                    "student" => RoleFilter::Only(Role::Student),
                    "faculty" => RoleFilter::Only(Role::Faculty),
                    _ => RoleFilter::All,
                })
            })}>
                <option value="all" selected={role == RoleFilter::All}>{"Everyone"}</option>
                <option value="student" selected={role == RoleFilter::Only(Role::Student)}>{"Students"}</option>
                <option value="faculty" selected={role == RoleFilter::Only(Role::Faculty)}>{"Faculty"}</option>
            </select>
            <select onchange={link.callback(|e: Event| {
                let value = e.target_unchecked_into::<HtmlSelectElement>().value();
                Msg::SetRatingFilter(match value.parse::<u8>() {
                    Ok(stars) => RatingFilter::Exactly(stars),
                    Err(_) => RatingFilter::Any,
                })
            })}>
                <option value="any" selected={rating == RatingFilter::Any}>{"Any rating"}</option>
                {
                    for (1..=5u8).rev().map(|stars| html! {
                        <option
                            value={stars.to_string()}
                            selected={rating == RatingFilter::Exactly(stars)}
                        >
                            { format!("{stars} ★") }
                        </option>
                    })
                }
            </select>
        </div>
    }
}

fn review_card(review: &Review) -> Html {
    html! {
        <article class="review-card" key={review.id.clone()}>
            <header class="review-head">
                <span class="review-name">{ review.name.clone() }</span>
                <span class="review-role">{ review.role.label() }</span>
                <span class="review-date">{ format_date(&review.created_at).to_string() }</span>
            </header>
            <div class="review-stars">{ build_stars(review.clamped_rating()) }</div>
            {
                review.experience.as_ref().map(|text| html! {
                    <p class="review-text">{ text.clone() }</p>
                })
            }
            {
                if review.recommends() {
                    html! { <span class="badge">{"Recommends it"}</span> }
                } else {
                    html! {}
                }
            }
        </article>
    }
}

/// Decorative burst shown after a five-star submission. Pure presentation;
/// cleared by `Msg::CelebrationDone` a few seconds later.
fn build_confetti() -> Html {
    let pieces = (0..CONFETTI_PIECES)
        .map(|i| {
            let left = js_sys::Math::random() * 100.0;
            let delay = js_sys::Math::random() * 0.8;
            let hue = (js_sys::Math::random() * 360.0) as u32;
            html! {
                <span
                    key={i.to_string()}
                    class="confetti-piece"
                    style={format!(
                        "left:{left:.1}%;animation-delay:{delay:.2}s;background:hsl({hue},90%,60%);"
                    )}
                />
            }
        })
        .collect::<Html>();

    html! { <div class="confetti" aria-hidden="true">{ pieces }</div> }
}
