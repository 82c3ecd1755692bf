/// Registration and login forms

use maud::{html, Markup};

use crate::middleware::session::PageContext;
use crate::views::layout;

pub fn register_form(context: &PageContext) -> Markup {
    layout::page(
        context,
        "Register",
        html! {
            div class="row justify-content-center" {
                div class="col-md-6" {
                    h1 { "Register" }
                    form action="/register" method="post" {
                        div class="mb-3" {
                            label class="form-label" for="username" { "Username" }
                            input class="form-control" type="text" id="username" name="username" required;
                        }
                        div class="mb-3" {
                            label class="form-label" for="email" { "Email" }
                            input class="form-control" type="email" id="email" name="email" required;
                        }
                        div class="mb-3" {
                            label class="form-label" for="password" { "Password" }
                            input class="form-control" type="password" id="password" name="password" required;
                        }
                        button class="btn btn-success" type="submit" { "Register" }
                    }
                }
            }
        },
    )
}

pub fn login_form(context: &PageContext) -> Markup {
    layout::page(
        context,
        "Login",
        html! {
            div class="row justify-content-center" {
                div class="col-md-6" {
                    h1 { "Login" }
                    form action="/login" method="post" {
                        div class="mb-3" {
                            label class="form-label" for="username" { "Username" }
                            input class="form-control" type="text" id="username" name="username" required;
                        }
                        div class="mb-3" {
                            label class="form-label" for="password" { "Password" }
                            input class="form-control" type="password" id="password" name="password" required;
                        }
                        button class="btn btn-success" type="submit" { "Login" }
                    }
                }
            }
        },
    )
}
