//! Pinned npm dependency versions used in generated `package.json` files.

/// Version ranges for every package a plugin may queue.
pub const DEPENDENCY_VERSIONS: &[(&str, &str)] = &[
    // tooling
    ("typescript", "^5.8.2"),
    ("tsx", "^4.19.2"),
    ("tsdown", "^0.12.9"),
    ("@types/node", "^22.13.11"),
    ("@types/bun", "^1.2.6"),
    ("vite", "^6.2.2"),
    ("@vitejs/plugin-react", "^4.3.4"),
    ("dotenv", "^16.4.7"),
    ("zod", "^3.25.16"),
    // frontend
    ("react", "^19.0.0"),
    ("react-dom", "^19.0.0"),
    ("@types/react", "^19.0.12"),
    ("@types/react-dom", "^19.0.4"),
    ("@tanstack/react-router", "^1.114.25"),
    ("@tanstack/router-plugin", "^1.114.27"),
    ("@tanstack/react-start", "^1.121.0"),
    ("react-router", "^7.4.1"),
    ("@react-router/dev", "^7.4.1"),
    ("next", "15.3.0"),
    ("nuxt", "^3.16.2"),
    ("vue", "^3.5.13"),
    ("svelte", "^5.25.3"),
    ("@sveltejs/kit", "^2.20.2"),
    ("solid-js", "^1.9.5"),
    ("vite-plugin-solid", "^2.11.6"),
    ("expo", "^53.0.0"),
    ("react-native", "0.79.2"),
    ("nativewind", "^4.1.23"),
    ("react-native-unistyles", "^3.0.0"),
    // backend
    ("hono", "^4.7.6"),
    ("@hono/node-server", "^1.14.0"),
    ("express", "^5.1.0"),
    ("@types/express", "^5.0.1"),
    ("cors", "^2.8.5"),
    ("@types/cors", "^2.8.17"),
    ("fastify", "^5.3.3"),
    ("@fastify/cors", "^11.0.1"),
    ("elysia", "^1.2.25"),
    ("@elysiajs/cors", "^1.2.0"),
    ("convex", "^1.23.0"),
    ("wrangler", "^4.23.0"),
    // database
    ("drizzle-orm", "^0.44.2"),
    ("drizzle-kit", "^0.31.2"),
    ("@libsql/client", "^0.15.9"),
    ("pg", "^8.14.1"),
    ("@types/pg", "^8.11.11"),
    ("mysql2", "^3.14.0"),
    ("prisma", "^6.9.0"),
    ("@prisma/client", "^6.9.0"),
    ("mongoose", "^8.14.0"),
    // auth
    ("better-auth", "^1.2.10"),
    ("@clerk/clerk-react", "^5.31.9"),
    // addons
    ("@biomejs/biome", "^2.0.0"),
    ("husky", "^9.1.7"),
    ("lint-staged", "^16.1.2"),
    ("turbo", "^2.5.4"),
    ("vitest", "^3.1.1"),
    ("@playwright/test", "^1.51.1"),
    ("cypress", "^14.2.1"),
    ("vite-plugin-pwa", "^1.0.1"),
    ("@tauri-apps/cli", "^2.4.0"),
];

/// Version range for `name`, or `latest` for packages outside the catalog.
pub fn version_of(name: &str) -> &'static str {
    DEPENDENCY_VERSIONS
        .iter()
        .find(|(package, _)| *package == name)
        .map(|(_, version)| *version)
        .unwrap_or("latest")
}
