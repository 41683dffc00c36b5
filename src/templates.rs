//! Static file templates: Dockerfiles, compose fragments and the FastAPI app.
//!
//! Compose fragments are plain text appended under `services:`; each one is
//! indented by two spaces and ends with a newline.

use crate::config::DockerConfig;
use crate::process::PackageManager;

/// Pinned to the version the generated app's Dockerfile has always installed.
const REACT_SCRIPTS: &str = "react-scripts@4.0.3 sass";

pub const COMPOSE_HEADER: &str = "version: '3.7'\nservices:\n";

pub const REQUIREMENTS_TXT: &str = "fastapi==0.63.0\nuvicorn==0.13.4\n";

pub const DB_USER: &str = "postgres";
pub const DB_PASSWORD: &str = "postgres";
pub const DB_NAME: &str = "app";

pub fn react_dockerfile(pm: PackageManager, docker: &DockerConfig) -> String {
    let (lockfile, install, start) = match pm {
        PackageManager::Yarn => ("yarn.lock", "yarn install --silent", r#"[ "yarn", "start" ]"#),
        PackageManager::Npm => (
            "package-lock.json",
            "npm install --silent",
            r#"[ "npm", "start" ]"#,
        ),
    };
    let global_tools = if docker.install_global_tools {
        format!("{}\n", pm.global_install_line(REACT_SCRIPTS))
    } else {
        String::new()
    };

    format!(
        r#"FROM {image}
WORKDIR /app
ENV PATH=/app/node_modules/.bin:$PATH
COPY package.json ./
COPY {lockfile} ./
RUN {install}
{global_tools}COPY . /app/
EXPOSE 3000
CMD {start}
"#,
        image = docker.node_image,
    )
}

pub fn react_compose(title: &str) -> String {
    format!(
        r#"  react:
    container_name: "{title}_react_app"
    build:
      context: ./app
    volumes:
      - './app:/app'
      - './app/node_modules:/app/node_modules'
    ports:
      - 3000:3000
    environment:
      - CHOKIDAR_USEPOLLING=true
"#
    )
}

pub fn api_dockerfile(docker: &DockerConfig) -> String {
    format!(
        r#"FROM {image}
WORKDIR /api
ENV PYTHONDONTWRITEBYTECODE=1
ENV PYTHONUNBUFFERED=1
COPY requirements.txt ./
RUN pip install --no-cache-dir -r requirements.txt
COPY . /api/
EXPOSE 8000
"#,
        image = docker.python_image,
    )
}

pub fn database_url() -> String {
    format!("postgresql://{DB_USER}:{DB_PASSWORD}@db:5432/{DB_NAME}")
}

pub fn api_compose(title: &str) -> String {
    // Wait for postgres to accept connections before starting uvicorn.
    let command = "bash -c 'while !</dev/tcp/db/5432; do sleep 1; done; \
                   uvicorn main:app --host 0.0.0.0 --port 8000 --reload'";
    format!(
        r#"  api:
    container_name: "{title}_api"
    build:
      context: ./api
    command: "{command}"
    volumes:
      - './api:/api'
    ports:
      - 8000:8000
    environment:
      - DATABASE_URL={url}
    depends_on:
      - db
"#,
        url = database_url(),
    )
}

pub fn db_compose(title: &str, docker: &DockerConfig) -> String {
    format!(
        r#"  db:
    container_name: "{title}_db"
    image: {image}
    volumes:
      - './db/data:/var/lib/postgresql/data'
    ports:
      - 5432:5432
    environment:
      - POSTGRES_USER={DB_USER}
      - POSTGRES_PASSWORD={DB_PASSWORD}
      - POSTGRES_DB={DB_NAME}
"#,
        image = docker.postgres_image,
    )
}

pub fn fastapi_main(title: &str) -> String {
    format!(
        r#"from fastapi import FastAPI

app = FastAPI(title="{title} FastAPI")


@app.get("/")
def read_root():
    return {{"hello": "world"}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_react_dockerfile_yarn() {
        let docker = DockerConfig::default();
        let df = react_dockerfile(PackageManager::Yarn, &docker);
        assert!(df.starts_with("FROM node:14\n"));
        assert!(df.contains("COPY yarn.lock ./"));
        assert!(df.contains("RUN yarn global add react-scripts@4.0.3 sass\n"));
        assert!(df.contains("EXPOSE 3000"));
        assert!(df.ends_with("CMD [ \"yarn\", \"start\" ]\n"));
    }

    #[test]
    fn test_react_dockerfile_npm_without_globals() {
        let docker = DockerConfig {
            install_global_tools: false,
            ..DockerConfig::default()
        };
        let df = react_dockerfile(PackageManager::Npm, &docker);
        assert!(df.contains("COPY package-lock.json ./"));
        assert!(df.contains("RUN npm install --silent\nCOPY . /app/"));
        assert!(!df.contains("-g"));
    }

    #[test]
    fn test_api_command_is_one_line() {
        let fragment = api_compose("demo");
        let command = fragment
            .lines()
            .find(|l| l.trim_start().starts_with("command:"))
            .unwrap();
        assert!(command.contains("</dev/tcp/db/5432"));
        assert!(command.contains("uvicorn main:app --host 0.0.0.0 --port 8000"));
        assert!(fragment.contains("DATABASE_URL=postgresql://postgres:postgres@db:5432/app"));
    }

    #[test]
    fn test_fastapi_main_interpolates_title() {
        let main = fastapi_main("blue-otter");
        assert!(main.contains(r#"app = FastAPI(title="blue-otter FastAPI")"#));
        assert!(main.contains(r#"return {"hello": "world"}"#));
    }

    #[test]
    fn test_fragments_are_indented_under_services() {
        let docker = DockerConfig::default();
        for fragment in [react_compose("t"), api_compose("t"), db_compose("t", &docker)] {
            assert!(fragment.ends_with('\n'));
            assert!(fragment.lines().all(|l| l.starts_with("  ")));
        }
    }
}
