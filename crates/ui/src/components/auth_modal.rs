use dioxus::prelude::*;

use flow_core::model::User;
use flow_core::validation::{AuthMode, Field};
use services::{AuthError, SocialProvider};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::AuthFormVm;

#[component]
pub fn AuthModal(mode: AuthMode, on_close: Callback<()>, on_success: Callback<User>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut form = use_signal(|| AuthFormVm::new(mode));
    let mut loading = use_signal(|| false);
    let mut failure = use_signal(|| None::<ViewError>);

    let submit = {
        let auth = ctx.auth();
        move |evt: FormEvent| {
            evt.prevent_default();
            if loading() || !form.write().validate() {
                return;
            }
            let auth = auth.clone();
            let snapshot = form.read().clone();
            loading.set(true);
            failure.set(None);
            spawn(async move {
                let result = auth.submit(snapshot.mode(), snapshot.credentials()).await;
                loading.set(false);
                match result {
                    Ok(user) => on_success.call(user),
                    Err(AuthError::Validation(errors)) => form.write().show_errors(errors),
                    Err(e) => failure.set(Some(ViewError::from(e))),
                }
            });
        }
    };

    let social = {
        let auth = ctx.auth();
        move |provider: SocialProvider| {
            if loading() {
                return;
            }
            let auth = auth.clone();
            loading.set(true);
            failure.set(None);
            spawn(async move {
                let result = auth.register_social(provider).await;
                loading.set(false);
                match result {
                    Ok(user) => on_success.call(user),
                    Err(e) => failure.set(Some(ViewError::from(e))),
                }
            });
        }
    };

    let vm = form.read().clone();
    let busy = loading();
    let submit_label = if busy { "Please wait..." } else { vm.submit_label() };

    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal auth-modal",
                onclick: move |evt| evt.stop_propagation(),
                div { class: "modal-header",
                    h2 { "{vm.title()}" }
                    button {
                        class: "modal-close",
                        r#type: "button",
                        aria_label: "Close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                form { class: "auth-form", onsubmit: submit,
                    if vm.is_register() {
                        FormField {
                            field: Field::Name,
                            label: "Name",
                            input_type: "text",
                            value: vm.credentials().name.clone(),
                            error: vm.error_for(Field::Name),
                            on_input: move |value| form.write().set_field(Field::Name, value),
                        }
                    }
                    FormField {
                        field: Field::Email,
                        label: "Email",
                        input_type: "email",
                        value: vm.credentials().email.clone(),
                        error: vm.error_for(Field::Email),
                        on_input: move |value| form.write().set_field(Field::Email, value),
                    }
                    FormField {
                        field: Field::Password,
                        label: "Password",
                        input_type: "password",
                        value: vm.credentials().password.clone(),
                        error: vm.error_for(Field::Password),
                        on_input: move |value| form.write().set_field(Field::Password, value),
                    }
                    if vm.is_register() {
                        FormField {
                            field: Field::ConfirmPassword,
                            label: "Confirm password",
                            input_type: "password",
                            value: vm.credentials().confirm_password.clone(),
                            error: vm.error_for(Field::ConfirmPassword),
                            on_input: move |value| {
                                form.write().set_field(Field::ConfirmPassword, value);
                            },
                        }
                    }
                    if let Some(err) = failure() {
                        p { class: "form-failure", role: "alert", "{err.message()}" }
                    }
                    button {
                        class: "btn btn-primary btn-block",
                        r#type: "submit",
                        disabled: busy,
                        "{submit_label}"
                    }
                }
                div { class: "auth-divider", span { "or continue with" } }
                div { class: "social-row",
                    for provider in SocialProvider::ALL {
                        button {
                            key: "{provider}",
                            class: "btn btn-outline",
                            r#type: "button",
                            disabled: busy,
                            onclick: {
                                let mut social = social.clone();
                                move |_| social(provider)
                            },
                            "{provider}"
                        }
                    }
                }
                button {
                    class: "link-button",
                    r#type: "button",
                    onclick: move |_| {
                        form.write().toggle_mode();
                        failure.set(None);
                    },
                    "{vm.toggle_label()}"
                }
            }
        }
    }
}

#[component]
fn FormField(
    field: Field,
    label: &'static str,
    input_type: &'static str,
    value: String,
    error: Option<&'static str>,
    on_input: Callback<String>,
) -> Element {
    let id = format!("auth-{}", field.key());
    rsx! {
        div { class: if error.is_some() { "form-field has-error" } else { "form-field" },
            label { r#for: "{id}", "{label}" }
            input {
                id: "{id}",
                r#type: input_type,
                value: "{value}",
                oninput: move |evt| on_input.call(evt.value()),
            }
            if let Some(message) = error {
                p { class: "field-error", "{message}" }
            }
        }
    }
}
