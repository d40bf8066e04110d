/// Amenity labels offered by the listing editor.
///
/// Listings may still carry labels outside this list.
pub const AMENITIES: [&str; 15] = [
    "Wi-Fi",
    "Piscina",
    "Café da Manhã",
    "Estacionamento",
    "Lareira",
    "Churrasqueira",
    "Pet Friendly",
    "Ar Condicionado",
    "TV",
    "Cozinha",
    "Trilhas",
    "Lago",
    "Passeio a Cavalo",
    "Quadra Esportiva",
    "Sauna",
];

pub fn is_catalogued(label: &str) -> bool {
    AMENITIES.contains(&label)
}
