//! Registration page view.

use dioxus::prelude::*;
use store::{ListingState, RegisterForm, ValidationErrors};
use ui::components::{Alert, Button, ButtonVariant, Field};
use ui::{use_auth, use_queries, AuthState};

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let mut auth = use_auth();
    let queries = use_queries();
    let nav = use_navigator();
    let mut form = use_signal(RegisterForm::default);
    let mut errors = use_signal(ValidationErrors::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, redirect to tasks
    if auth().user.is_some() {
        nav.replace(Route::Tasks {
            query: ListingState::default(),
        });
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let credentials = match form.read().validate() {
            Ok(credentials) => credentials,
            Err(invalid) => {
                errors.set(invalid);
                return;
            }
        };
        errors.set(ValidationErrors::default());
        let queries = queries.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);
            match queries.auth.register(&credentials).await {
                Ok(user) => {
                    auth.set(AuthState::signed_in(user));
                    nav.replace(Route::Tasks {
                        query: ListingState::default(),
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "registration failed");
                    loading.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let field_error = move |field: &str| errors.read().get(field).map(str::to_string);

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-title", "Create Account" }
                p { class: "auth-subtitle", "Sign up to start managing your tasks" }

                form {
                    onsubmit: handle_register,
                    class: "auth-form",

                    if let Some(err) = error() {
                        Alert { message: err }
                    }

                    Field {
                        label: "Username",
                        html_for: "username",
                        error: field_error("username"),
                        input {
                            id: "username",
                            class: "input",
                            r#type: "text",
                            autocomplete: "username",
                            placeholder: "Choose a username",
                            value: "{form.read().username}",
                            oninput: move |evt: FormEvent| form.write().username = evt.value(),
                        }
                    }

                    Field {
                        label: "Password",
                        html_for: "password",
                        error: field_error("password"),
                        input {
                            id: "password",
                            class: "input",
                            r#type: "password",
                            autocomplete: "new-password",
                            placeholder: "Password (min 6 characters)",
                            value: "{form.read().password}",
                            oninput: move |evt: FormEvent| form.write().password = evt.value(),
                        }
                    }

                    Field {
                        label: "Confirm Password",
                        html_for: "confirm-password",
                        error: field_error("confirmPassword"),
                        input {
                            id: "confirm-password",
                            class: "input",
                            r#type: "password",
                            autocomplete: "new-password",
                            placeholder: "Confirm your password",
                            value: "{form.read().confirm_password}",
                            oninput: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                        }
                    }

                    Button {
                        variant: ButtonVariant::Primary,
                        class: "auth-submit",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Sign up" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
